/// How a record whose id was already seen is treated.
///
/// `LastWins` is the behavior the card list has always had: the later record
/// replaces the earlier one but keeps the earlier one's slot in the node order.
/// Whether that overwrite is intended de-duplication is still undecided, so the
/// policy is explicit and duplicates are always reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    #[default]
    LastWins,
    FirstWins,
}

/// Distance between the layout rings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RadiusStep {
    /// `base + per_node * total`, so dense graphs get more room.
    Scaled { base: f64, per_node: f64 },
    Fixed(f64),
}

impl RadiusStep {
    pub fn for_total(self, total: usize) -> f64 {
        match self {
            Self::Scaled { base, per_node } => base + per_node * total as f64,
            Self::Fixed(step) => step,
        }
    }
}

impl Default for RadiusStep {
    fn default() -> Self {
        Self::Scaled {
            base: 100.0,
            per_node: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: RadiusStep,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_x: 300.0,
            center_y: 200.0,
            radius: RadiusStep::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GraphConfig {
    pub layout: LayoutConfig,
    pub duplicates: DuplicatePolicy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Collapse repeated (source, target) pairs to their first occurrence.
    pub dedup_edges: bool,
    /// Flow direction written after the `graph` header (`TD`, `LR`, ...).
    pub direction: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            dedup_edges: false,
            direction: "TD".to_owned(),
        }
    }
}
