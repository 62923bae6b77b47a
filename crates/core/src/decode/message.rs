use super::grid::Grid;

/// Read the uppercase letters of `grid` in reading order.
///
/// Everything else (lowercase, digits, punctuation, blanks) is skipped. A
/// grid without uppercase letters yields an empty string.
pub fn extract_message(grid: &Grid) -> String {
    grid.chars().filter(|c| c.is_uppercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_row_major_left_to_right() {
        let g = Grid::from_rows(&["AbC ", "dEf "], ' ');
        assert_eq!(extract_message(&g), "ACE");
    }

    #[test]
    fn no_uppercase_gives_empty_string() {
        let g = Grid::from_rows(&["abc", "1 2", "█░▀"], ' ');
        assert_eq!(extract_message(&g), "");
        assert_eq!(extract_message(&Grid::empty()), "");
    }

    #[test]
    fn non_ascii_uppercase_letters_count() {
        let g = Grid::from_rows(&["éÉ", "ßΩ"], ' ');
        assert_eq!(extract_message(&g), "ÉΩ");
    }
}
