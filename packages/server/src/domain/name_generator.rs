//! Display name generation for new channels.
//!
//! Names look like `SwiftFalcon42`: an adjective, a noun and a number in
//! `1..=999`. With 24 × 24 × 999 combinations collisions are possible and
//! accepted; the channel id is what identifies a participant.

use rand::Rng;

use super::value_object::DisplayName;

pub const ADJECTIVES: [&str; 24] = [
    "Happy", "Bright", "Swift", "Clever", "Bold", "Kind", "Wise", "Brave", "Calm", "Eager",
    "Gentle", "Lively", "Proud", "Silent", "Witty", "Zesty", "Amber", "Azure", "Coral", "Emerald",
    "Golden", "Ivory", "Jade", "Ruby",
];

pub const NOUNS: [&str; 24] = [
    "Tiger", "Eagle", "Wolf", "Lion", "Fox", "Bear", "Hawk", "Falcon", "Dolphin", "Whale",
    "Shark", "Panda", "Koala", "Owl", "Raven", "Swan", "Phoenix", "Dragon", "Griffin", "Unicorn",
    "Pegasus", "Knight", "Wizard", "Mage",
];

/// Source of display names, injected into the connect use case
pub trait NameGenerator: Send + Sync {
    fn generate(&self) -> DisplayName;
}

/// Generates names from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNameGenerator;

impl NameGenerator for RandomNameGenerator {
    fn generate(&self) -> DisplayName {
        generate_display_name(&mut rand::thread_rng())
    }
}

/// Always returns the same name (for testing)
#[derive(Debug, Clone)]
pub struct FixedNameGenerator {
    name: DisplayName,
}

impl FixedNameGenerator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: DisplayName::new(name),
        }
    }
}

impl NameGenerator for FixedNameGenerator {
    fn generate(&self) -> DisplayName {
        self.name.clone()
    }
}

/// Build a display name from the given RNG.
pub fn generate_display_name<R: Rng + ?Sized>(rng: &mut R) -> DisplayName {
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    let number: u16 = rng.gen_range(1..=999);
    DisplayName::new(format!("{}{}{}", adjective, noun, number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn split_name(name: &str) -> Option<(&str, &str, u16)> {
        let adjective = ADJECTIVES.iter().copied().find(|a| name.starts_with(a))?;
        let rest = &name[adjective.len()..];
        let noun = NOUNS.iter().copied().find(|n| rest.starts_with(n))?;
        let number = rest[noun.len()..].parse().ok()?;
        Some((adjective, noun, number))
    }

    #[test]
    fn test_generated_names_follow_adjective_noun_number() {
        // テスト項目: 生成された名前は 形容詞 + 名詞 + 1..=999 の形になる
        // given (前提条件):
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            // when (操作):
            let name = generate_display_name(&mut rng);

            // then (期待する結果):
            let (_, _, number) = split_name(name.as_str())
                .unwrap_or_else(|| panic!("unexpected name shape: {}", name));
            assert!((1..=999).contains(&number));
        }
    }

    #[test]
    fn test_same_seed_gives_same_name() {
        // テスト項目: 同じシードからは同じ名前が生成される（純粋関数）
        // given (前提条件):
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        // when (操作):
        let name1 = generate_display_name(&mut rng1);
        let name2 = generate_display_name(&mut rng2);

        // then (期待する結果):
        assert_eq!(name1, name2);
    }

    #[test]
    fn test_fixed_name_generator_returns_configured_name() {
        // テスト項目: FixedNameGenerator は常に設定した名前を返す
        // given (前提条件):
        let generator = FixedNameGenerator::new("CalmOwl1");

        // when (操作):
        let names = [generator.generate(), generator.generate()];

        // then (期待する結果):
        assert!(names.iter().all(|n| n.as_str() == "CalmOwl1"));
    }
}
