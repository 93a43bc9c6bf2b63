/// Cuts a paper title to `max_chars`, ending in an ellipsis when shortened.
pub fn short_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_owned();
    }

    let kept = title.chars().take(max_chars.saturating_sub(1)).collect::<String>();
    format!("{}…", kept.trim_end())
}

pub fn format_influence(influence: f64) -> String {
    format!("{:>5.1}%", influence * 100.0)
}
