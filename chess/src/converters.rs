//! Text conversions for squares, files and ranks ("e2" <-> Square).

use cozy_chess::{File, Rank, Square};

/// Parse a square string like "e2".
pub fn parse_square(s: &str) -> Option<Square> {
    let mut chars = s.trim().chars();
    let file = parse_file(chars.next()?)?;
    let rank = parse_rank(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    Some(Square::new(file, rank))
}

/// Parse a file character like 'e'.
pub fn parse_file(c: char) -> Option<File> {
    let c = c.to_ascii_lowercase();
    if ('a'..='h').contains(&c) {
        Some(File::index(c as usize - 'a' as usize))
    } else {
        None
    }
}

/// Parse a rank character like '2'.
pub fn parse_rank(c: char) -> Option<Rank> {
    if ('1'..='8').contains(&c) {
        Some(Rank::index(c as usize - '1' as usize))
    } else {
        None
    }
}

/// Format a square as "e2".
pub fn format_square(sq: Square) -> String {
    format!("{}{}", format_file(sq.file()), format_rank(sq.rank()))
}

pub fn format_file(f: File) -> char {
    (b'a' + f as u8) as char
}

pub fn format_rank(r: Rank) -> char {
    (b'1' + r as u8) as char
}

/// Zero-based (file, rank) pair, a1 = (0, 0).
pub fn square_coords(sq: Square) -> (u8, u8) {
    (sq.file() as u8, sq.rank() as u8)
}

pub fn square_from_coords(file: u8, rank: u8) -> Option<Square> {
    if file > 7 || rank > 7 {
        return None;
    }
    Some(Square::new(File::index(file as usize), Rank::index(rank as usize)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square() {
        let sq = parse_square("e2").unwrap();
        assert_eq!(sq.file(), File::E);
        assert_eq!(sq.rank(), Rank::Second);
        assert_eq!(parse_square("H8"), Some(Square::new(File::H, Rank::Eighth)));
    }

    #[test]
    fn test_parse_square_rejects_garbage() {
        assert_eq!(parse_square(""), None);
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("a1b"), None);
    }

    #[test]
    fn test_format_square() {
        assert_eq!(format_square(Square::new(File::E, Rank::Fourth)), "e4");
        assert_eq!(format_square(Square::new(File::A, Rank::First)), "a1");
    }

    #[test]
    fn test_coords_round_trip_all_squares() {
        for idx in 0..64 {
            let sq = Square::index(idx);
            let (file, rank) = square_coords(sq);
            assert_eq!(square_from_coords(file, rank), Some(sq));
            assert_eq!(parse_square(&format_square(sq)), Some(sq));
        }
        assert_eq!(square_from_coords(8, 0), None);
    }
}
