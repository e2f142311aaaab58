use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 4;

/// Reference shown to the user after a successful send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: String,
    pub issued_at_ms: u64,
}

impl Ticket {
    /// `TKT-<timestamp in base 36>-<4 random base-36 chars>`, uppercase.
    pub fn issue<R: Rng + ?Sized>(now_ms: u64, rng: &mut R) -> Self {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
            .collect();
        Self {
            id: format!("TKT-{}-{}", to_base36(now_ms), suffix),
            issued_at_ms: now_ms,
        }
    }
}

/// Uppercase base-36 rendering of `n`.
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn is_base36_upper(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
    }

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "LOYW3V28");
    }

    #[test]
    fn ticket_id_has_expected_shape() {
        let mut rng = StdRng::seed_from_u64(11);
        let ticket = Ticket::issue(1_700_000_000_000, &mut rng);
        let parts: Vec<&str> = ticket.id.split('-').collect();
        assert_eq!(parts.len(), 3, "{}", ticket.id);
        assert_eq!(parts[0], "TKT");
        assert_eq!(parts[1], "LOYW3V28");
        assert_eq!(parts[2].len(), 4);
        assert!(is_base36_upper(parts[2]));
        assert_eq!(ticket.issued_at_ms, 1_700_000_000_000);
    }

    #[test]
    fn suffixes_vary() {
        let mut rng = StdRng::seed_from_u64(2);
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| Ticket::issue(1, &mut rng).id).collect();
        assert!(ids.len() > 45);
    }
}
