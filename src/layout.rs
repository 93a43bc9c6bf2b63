use std::f64::consts::TAU;

use crate::citation::{PaperNode, Position};
use crate::config::LayoutConfig;

/// Rank index from which every node shares the outer ring.
const OUTER_RING: usize = 2;

/// Node slots ordered by outgoing reference count, most citing first.
/// `sort_by` is stable, so ties keep their input order.
pub fn rank_order(nodes: &[PaperNode]) -> Vec<usize> {
    let mut order = (0..nodes.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| nodes[b].num_out.cmp(&nodes[a].num_out));
    order
}

/// Bullseye placement: rank 0 at the center, rank 1 on the inner ring, and
/// everyone else spread by angle around one fixed outer ring.
///
/// Positions are returned per node slot, not per rank.
pub fn rank_positions(nodes: &[PaperNode], config: &LayoutConfig) -> Vec<Position> {
    let total = nodes.len();
    if total == 0 {
        return Vec::new();
    }

    let radius_step = config.radius.for_total(total);
    let mut positions = vec![Position::default(); total];

    for (rank, slot) in rank_order(nodes).into_iter().enumerate() {
        let angle = (rank as f64 / total as f64) * TAU;
        let radius = radius_step * rank.min(OUTER_RING) as f64;
        positions[slot] = Position {
            x: config.center_x + radius * angle.cos(),
            y: config.center_y + radius * angle.sin(),
        };
    }

    positions
}

#[cfg(test)]
mod tests {
    use crate::citation::PaperRecord;
    use crate::config::RadiusStep;

    use super::*;

    fn nodes_with_out_degree(degrees: &[usize]) -> Vec<PaperNode> {
        degrees
            .iter()
            .enumerate()
            .map(|(index, &degree)| {
                let refs = (0..degree).map(|r| format!("ref-{r}")).collect();
                PaperNode::from_record(PaperRecord::new(format!("n{index}"), refs))
            })
            .collect()
    }

    fn distance(config: &LayoutConfig, position: Position) -> f64 {
        (position.x - config.center_x).hypot(position.y - config.center_y)
    }

    #[test]
    fn empty_layout() {
        assert!(rank_positions(&[], &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn single_node_sits_at_center() {
        let config = LayoutConfig::default();
        let positions = rank_positions(&nodes_with_out_degree(&[3]), &config);
        assert_eq!(
            positions,
            vec![Position {
                x: config.center_x,
                y: config.center_y
            }]
        );
    }

    #[test]
    fn ties_keep_input_order() {
        let nodes = nodes_with_out_degree(&[1, 4, 1, 4, 0]);
        assert_eq!(rank_order(&nodes), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn radius_caps_after_two_rings() {
        let config = LayoutConfig::default();
        let nodes = nodes_with_out_degree(&[0, 5, 1, 3, 2, 0, 0]);
        let positions = rank_positions(&nodes, &config);
        let order = rank_order(&nodes);
        let step = config.radius.for_total(nodes.len());

        assert_eq!(positions[order[0]].x, config.center_x);
        assert_eq!(positions[order[0]].y, config.center_y);
        assert!((distance(&config, positions[order[1]]) - step).abs() < 1e-9);
        for &slot in &order[2..] {
            assert!((distance(&config, positions[slot]) - 2.0 * step).abs() < 1e-9);
        }
    }

    #[test]
    fn scaled_step_grows_with_graph_size() {
        assert_eq!(RadiusStep::default().for_total(4), 120.0);
        assert_eq!(RadiusStep::Fixed(50.0).for_total(400), 50.0);
    }

    #[test]
    fn angles_increase_with_rank() {
        let config = LayoutConfig {
            center_x: 0.0,
            center_y: 0.0,
            radius: RadiusStep::Fixed(10.0),
        };
        let nodes = nodes_with_out_degree(&[3, 2, 1, 0]);
        let positions = rank_positions(&nodes, &config);
        // rank 2 of 4 sits at angle pi, rank 3 at 3pi/2
        assert!((positions[2].x + 20.0).abs() < 1e-9);
        assert!((positions[3].y + 20.0).abs() < 1e-9);
    }
}
