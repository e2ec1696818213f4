use formats::VoteCount;

use crate::config::TileConfig;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TileTier {
    /// Share above `leading_share`.
    Leading,
    /// Share above `competitive_share`.
    Competitive,
    Trailing,
}

impl TileTier {
    fn palette_index(self) -> usize {
        match self {
            TileTier::Leading => 0,
            TileTier::Competitive => 1,
            TileTier::Trailing => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub name: String,
    pub label: String,
    pub votes: u64,
    /// `votes / total`, in `[0, 1]`.
    pub share: f64,
    /// Rounded share in percent, for display.
    pub percent: u32,
    pub width_px: f64,
    pub tier: TileTier,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileList {
    /// Sum of all votes; zero totals are kept as zero here.
    pub total: u64,
    pub tiles: Vec<Tile>,
}

/// Short display label: the second whitespace-separated token, else the name.
pub fn short_label(name: &str) -> &str {
    name.split_whitespace().nth(1).unwrap_or(name)
}

pub fn classify(share: f64, config: &TileConfig) -> TileTier {
    if share > config.leading_share {
        TileTier::Leading
    } else if share > config.competitive_share {
        TileTier::Competitive
    } else {
        TileTier::Trailing
    }
}

/// Builds one tile per entry, in input order.
pub fn layout_tiles(entries: &[VoteCount], config: &TileConfig) -> TileList {
    let total: u64 = entries.iter().map(|e| e.votes).sum();
    // A zero total divides as 1: every tile gets share 0 and the minimum width.
    let divisor = total.max(1) as f64;

    let tiles = entries
        .iter()
        .map(|entry| {
            let share = entry.votes as f64 / divisor;
            let tier = classify(share, config);
            Tile {
                name: entry.name.clone(),
                label: short_label(&entry.name).to_string(),
                votes: entry.votes,
                share,
                percent: (share * 100.0).round() as u32,
                width_px: (share * config.full_width_px).max(config.min_width_px),
                tier,
                color: config.palette[tier.palette_index()].clone(),
            }
        })
        .collect();

    TileList { total, tiles }
}

#[cfg(test)]
mod tests {
    use super::{TileTier, classify, layout_tiles, short_label};
    use crate::config::TileConfig;
    use formats::VoteCount;

    fn votes(counts: &[u64]) -> Vec<VoteCount> {
        counts
            .iter()
            .enumerate()
            .map(|(i, v)| VoteCount::new(format!("Senator Number{i}"), *v))
            .collect()
    }

    #[test]
    fn widths_are_proportional_and_floored() {
        let config = TileConfig::default();
        let list = layout_tiles(&votes(&[50, 30, 20]), &config);
        assert_eq!(list.total, 100);
        let w: Vec<f64> = list.tiles.iter().map(|t| t.width_px).collect();
        assert!(w[0] > w[1] && w[1] > w[2], "{w:?}");
        assert!(w.iter().all(|&x| x >= config.min_width_px));
        assert_eq!(list.tiles[0].percent, 50);
    }

    #[test]
    fn tiny_and_zero_entries_get_the_floor() {
        let config = TileConfig::default();
        let list = layout_tiles(&votes(&[1000, 1, 0]), &config);
        assert_eq!(list.tiles[1].width_px, config.min_width_px);
        assert_eq!(list.tiles[2].width_px, config.min_width_px);
    }

    #[test]
    fn zero_total_does_not_divide_by_zero() {
        let config = TileConfig::default();
        let list = layout_tiles(&votes(&[0, 0]), &config);
        assert_eq!(list.total, 0);
        for t in &list.tiles {
            assert_eq!(t.share, 0.0);
            assert_eq!(t.width_px, config.min_width_px);
            assert_eq!(t.tier, TileTier::Trailing);
        }
        assert!(layout_tiles(&[], &config).tiles.is_empty());
    }

    #[test]
    fn tier_boundaries_are_exclusive() {
        let config = TileConfig::default();
        // Exactly 35% is not leading; exactly 18% is not competitive.
        let list = layout_tiles(&votes(&[35, 18, 47]), &config);
        assert_eq!(list.tiles[0].tier, TileTier::Competitive);
        assert_eq!(list.tiles[1].tier, TileTier::Trailing);
        assert_eq!(list.tiles[2].tier, TileTier::Leading);

        let list = layout_tiles(&votes(&[36, 19, 45]), &config);
        assert_eq!(list.tiles[0].tier, TileTier::Leading);
        assert_eq!(list.tiles[1].tier, TileTier::Competitive);

        assert_eq!(classify(0.35, &config), TileTier::Competitive);
        assert_eq!(classify(0.18, &config), TileTier::Trailing);
        assert_eq!(classify(70.0 / 200.0, &config), TileTier::Competitive);
    }

    #[test]
    fn colours_follow_tier_palette() {
        let config = TileConfig::default();
        let list = layout_tiles(&votes(&[60, 25, 15]), &config);
        let colors: Vec<&str> = list.tiles.iter().map(|t| t.color.as_str()).collect();
        assert_eq!(colors, vec!["#ff6a6a", "#ffb86a", "#6ad7ff"]);
    }

    #[test]
    fn labels_use_second_token() {
        assert_eq!(short_label("Aziz Karimov"), "Karimov");
        assert_eq!(short_label("Cher"), "Cher");
        assert_eq!(short_label("Maria  del Carmen"), "del");
        assert_eq!(short_label(""), "");
    }
}
