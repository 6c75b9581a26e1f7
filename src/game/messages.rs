use rand::Rng;
use rand::seq::SliceRandom;

/// Response lines for a matched beat.
pub const MATCH_RESPONSES: &[&str] = &[
    "Beat matched!",
    "Well done!",
    "Awesome!!!",
    "good",
    "GREAT!",
    "Superb!",
];

/// Response lines for a missed beat.
pub const MISS_RESPONSES: &[&str] = &[
    "Beat missed :(",
    "NOPE",
    "fail.",
    "miss.",
    "MISS",
    "You can do better!",
    "try again",
    "hmm...",
];

/// Pick a random response line.
pub fn pick_response<R: Rng>(rng: &mut R, responses: &'static [&'static str]) -> &'static str {
    responses.choose(rng).copied().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn pick_comes_from_the_list() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let line = pick_response(&mut rng, MATCH_RESPONSES);
            assert!(MATCH_RESPONSES.contains(&line));
        }
    }

    #[test]
    fn empty_list_yields_empty_line() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_response(&mut rng, &[]), "");
    }
}
