/// Shared presentation tables for the mini-game catalogue.
///
/// Colors are a fixed categorical palette with easily describable hues so a
/// child (or a parent reading along) can name them. Assignments are stable
/// and cycle by index % len.
const PALETTE: [&str; 12] = [
    "tomato",        // 0
    "orange",        // 1
    "gold",          // 2
    "yellowgreen",   // 3
    "mediumseagreen",// 4
    "teal",          // 5
    "deepskyblue",   // 6
    "dodgerblue",    // 7
    "mediumpurple",  // 8
    "hotpink",       // 9
    "peru",          // 10
    "slategray",     // 11
];

/// Stable tint for an unplaced puzzle piece or its slot highlight.
pub fn piece_color(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

/// Softer variant used for the hint outline at a piece's home slot.
pub fn hint_color() -> &'static str {
    "rgba(64, 160, 255, 0.45)"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_cycle_by_index() {
        assert_eq!(piece_color(0), piece_color(PALETTE.len()));
        assert_ne!(piece_color(0), piece_color(1));
    }
}
