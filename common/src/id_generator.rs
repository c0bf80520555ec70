use rand::Rng;

use crate::SessionId;

const ADJECTIVES: &[&str] = &[
    "swift", "brave", "clever", "mighty", "silent", "golden", "wild", "noble",
    "fierce", "gentle", "quick", "wise", "bold", "proud", "cunning", "sly",
];

const NOUNS: &[&str] = &[
    "falcon", "bear", "tiger", "wolf", "eagle", "dragon", "lion", "panther",
    "hawk", "fox", "raven", "cobra", "shark", "phoenix", "lynx", "viper",
];

pub fn generate_session_id() -> SessionId {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let suffix: u16 = rng.random_range(0..10_000);
    SessionId::new(format!("{}-{}-{:04}", adjective, noun, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_session_id_has_three_parts() {
        let id = generate_session_id();
        let parts: Vec<&str> = id.as_str().split('-').collect();

        assert_eq!(parts.len(), 3);
        assert!(ADJECTIVES.contains(&parts[0]));
        assert!(NOUNS.contains(&parts[1]));
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }
}
