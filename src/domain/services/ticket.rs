use rand::Rng;

/// Human-facing registration identifier: `TKT-` plus 8 uppercase hex digits
/// from 4 random bytes. Uniqueness is probabilistic; the space is large
/// enough that collisions are not checked for.
pub fn generate_ticket_number() -> String {
    let n: u32 = rand::thread_rng().gen();
    format!("TKT-{:08X}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_number_matches_expected_format() {
        for _ in 0..100 {
            let ticket = generate_ticket_number();
            assert_eq!(ticket.len(), 12);
            assert!(ticket.starts_with("TKT-"));
            assert!(ticket[4..]
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        }
    }
}
