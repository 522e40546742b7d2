use crate::types::Field;

/// closest canonical field to a raw field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: Field,
    pub distance: usize,
}

/// levenshtein edit distance over unicode scalar values, unit costs
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // two-row table
    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j] + cost)
                .min(prev_row[j + 1] + 1)
                .min(curr_row[j] + 1);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// nearest canonical field name; ties go to the earlier field
pub fn closest_field(raw_key: &str) -> FieldMatch {
    Field::ALL
        .iter()
        .map(|&field| FieldMatch {
            field,
            distance: levenshtein_distance(raw_key, field.name()),
        })
        .fold(
            FieldMatch {
                field: Field::Amount,
                distance: usize::MAX,
            },
            |best, candidate| {
                if candidate.distance < best.distance {
                    candidate
                } else {
                    best
                }
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein_distance("amount", "amount"), 0);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("term", ""), 4);
        assert_eq!(levenshtein_distance("", "term"), 4);
    }

    #[test]
    fn test_levenshtein_typos() {
        assert_eq!(levenshtein_distance("amut", "amount"), 2);
        assert_eq!(levenshtein_distance("intetesst", "interest"), 2);
        assert_eq!(levenshtein_distance("dwnpaument", "downpayment"), 2);
        assert_eq!(levenshtein_distance("trme", "term"), 2);
        assert_eq!(levenshtein_distance("intredt", "interest"), 2);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("térm", "term"), 1);
    }

    #[test]
    fn test_closest_field() {
        let m = closest_field("downpsyment");
        assert_eq!(m.field, Field::Downpayment);
        assert_eq!(m.distance, 1);

        let m = closest_field("percent");
        assert!(m.distance > 2);
    }
}
