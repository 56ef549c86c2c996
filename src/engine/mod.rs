pub mod affix;
pub mod dictionary;
pub mod suggestions;

pub use dictionary::Dictionary;

/// The spell-checking capability the session delegates to.
///
/// Implementations decide what "correctly spelled" means and how suggestions
/// are ranked. The session only ever asks these two questions.
pub trait SpellEngine {
    /// Returns true if `word` is spelled correctly.
    fn check(&self, word: &str) -> bool;

    /// Ranked replacement candidates for `word`, best first. May be empty.
    fn suggest(&self, word: &str) -> Vec<String>;
}

impl<E: SpellEngine + ?Sized> SpellEngine for Box<E> {
    fn check(&self, word: &str) -> bool {
        (**self).check(word)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        (**self).suggest(word)
    }
}
