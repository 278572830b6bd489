//! Natural ("human") string ordering.
//!
//! Runs of ASCII digits compare by numeric value, so `cfg2` sorts before `cfg10`.
//! Everything else compares byte by byte.

use std::cmp::Ordering;

/// Compares two strings in natural order.
///
/// - A digit sorts before a non-digit at the same position.
/// - Digit runs compare by value: leading zeros are skipped, then the shorter
///   significant run is smaller, then runs of equal length compare lexically.
///   Equal values with different zero padding order the less padded run first.
/// - When one string is a prefix of the other, the shorter one is smaller.
///
/// Two strings compare equal only if they are identical.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let (ca, cb) = (a[i], b[j]);
        match (ca.is_ascii_digit(), cb.is_ascii_digit()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {
                if ca != cb {
                    return ca.cmp(&cb);
                }
                i += 1;
                j += 1;
            }
            (true, true) => {
                let zeros_a = count_while(&a[i..], |c| c == b'0');
                let zeros_b = count_while(&b[j..], |c| c == b'0');
                let start_a = i + zeros_a;
                let start_b = j + zeros_b;
                let end_a = start_a + count_while(&a[start_a..], |c| c.is_ascii_digit());
                let end_b = start_b + count_while(&b[start_b..], |c| c.is_ascii_digit());

                let (run_a, run_b) = (&a[start_a..end_a], &b[start_b..end_b]);
                let ord = run_a
                    .len()
                    .cmp(&run_b.len())
                    .then_with(|| run_a.cmp(run_b))
                    .then_with(|| zeros_a.cmp(&zeros_b));
                if ord != Ordering::Equal {
                    return ord;
                }
                i = end_a;
                j = end_b;
            }
        }
    }

    (a.len() - i).cmp(&(b.len() - j))
}

/// `true` if `a` sorts strictly before `b` in natural order.
pub fn natural_less(a: &str, b: &str) -> bool {
    natural_cmp(a, b) == Ordering::Less
}

/// Stable-sorts `items` by the natural order of the key returned by `key`.
pub fn sort_naturally_by<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|x, y| natural_cmp(key(x), key(y)));
}

fn count_while(bytes: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    bytes.iter().take_while(|&&c| pred(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        sort_naturally_by(&mut v, |s| s.as_str());
        v
    }

    #[test]
    fn smaller_numeric_suffix_first() {
        for prefix in ["", "cfg", "item-", "a b"] {
            let two = format!("{prefix}2");
            let ten = format!("{prefix}10");
            assert!(natural_less(&two, &ten), "{two} < {ten}");
            assert!(!natural_less(&ten, &two));
        }
        assert!(natural_less("cfg9", "cfg100"));
        assert!(natural_less("v1.2.9", "v1.2.10"));
    }

    #[test]
    fn plain_text_is_lexicographic() {
        assert_eq!(natural_cmp("abc", "abd"), Ordering::Less);
        assert_eq!(natural_cmp("B", "a"), Ordering::Less);
        assert_eq!(natural_cmp("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn prefix_sorts_first() {
        assert!(natural_less("cfg", "cfg1"));
        assert!(natural_less("cfg", "cfga"));
        assert!(natural_less("", "a"));
    }

    #[test]
    fn digits_before_letters() {
        assert!(natural_less("cfg1", "cfga"));
        assert!(natural_less("1", "a"));
    }

    #[test]
    fn leading_zeros() {
        assert!(natural_less("a01", "a2"));
        assert!(natural_less("a1", "a01"));
        assert!(natural_less("a01", "a001"));
        assert_ne!(natural_cmp("a1", "a01"), Ordering::Equal);
    }

    #[test]
    fn equal_only_when_identical() {
        let names = ["a1", "a01", "a001", "a1b", "a", "b", "10", "010", "x0"];
        for x in names {
            for y in names {
                assert_eq!(natural_cmp(x, y) == Ordering::Equal, x == y, "{x} vs {y}");
                assert_eq!(natural_cmp(x, y), natural_cmp(y, x).reverse(), "{x} vs {y}");
            }
        }
    }

    #[test]
    fn transitive_over_sample() {
        let names = ["a1", "a01", "a2", "a10", "a", "a1b", "b", "1", "01", "x9y", "x10y"];
        for x in names {
            for y in names {
                for z in names {
                    if natural_less(x, y) && natural_less(y, z) {
                        assert!(natural_less(x, z), "{x} < {y} < {z}");
                    }
                }
            }
        }
    }

    #[test]
    fn sorts_human_order() {
        assert_eq!(sorted(&["b10", "b2", "a1"]), vec!["a1", "b2", "b10"]);
        assert_eq!(
            sorted(&["cfg10", "cfg2", "cfg1", "cfg20", "cfg3"]),
            vec!["cfg1", "cfg2", "cfg3", "cfg10", "cfg20"]
        );
    }

    #[test]
    fn sorting_is_idempotent() {
        let once = sorted(&["x3", "x12", "x1", "y", "x01"]);
        let refs: Vec<&str> = once.iter().map(String::as_str).collect();
        assert_eq!(sorted(&refs), once);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut items = vec![("same", 1), ("a", 0), ("same", 2), ("same", 3)];
        sort_naturally_by(&mut items, |item| item.0);
        assert_eq!(items, vec![("a", 0), ("same", 1), ("same", 2), ("same", 3)]);
    }
}
