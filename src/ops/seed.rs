use crate::model::board::{Board, Column, Item};

/// Generate a board of `columns` columns with `items_each` items apiece.
///
/// Columns are `column-0`, `column-1`, ... titled "0th column", "1st column",
/// ...; items are numbered across the whole board (`id:0` / "item 0", ...), so
/// every item id is unique.
pub fn generate(columns: usize, items_each: usize) -> Board {
    let mut next_item = 0usize;
    Board::from_values((0..columns).map(|i| {
        let items = (0..items_each)
            .map(|_| {
                let n = next_item;
                next_item += 1;
                Item::new(format!("id:{}", n), format!("item {}", n))
            })
            .collect();
        Column::new(format!("column-{}", i), format!("{} column", ordinal(i)), items)
    }))
}

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, ...
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals() {
        let cases = [
            (0, "0th"),
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (102, "102nd"),
            (111, "111th"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(n), expected, "ordinal of {}", n);
        }
    }

    #[test]
    fn generate_shape() {
        let board = generate(3, 4);
        assert_eq!(board.len(), 3);
        assert_eq!(board.total_items(), 12);
        assert!(board.is_permutation());
        assert_eq!(board.order(), &["column-0", "column-1", "column-2"]);

        let second = board.at(1).unwrap();
        assert_eq!(second.title, "1st column");
        assert_eq!(second.items[0].id, "id:4");
        assert_eq!(second.items[3].text, "item 7");
    }

    #[test]
    fn generate_empty() {
        let board = generate(0, 4);
        assert!(board.is_empty());
        assert_eq!(generate(2, 0).total_items(), 0);
    }
}
