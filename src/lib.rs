//! `rxset`: regular expressions as language-set values.
//!
//! A regex here denotes a subset of all finite strings over `char`, not a
//! matching program. The crate builds those sets (via the smart
//! constructors on [`Rx`]), composes them with Boolean and Kleene
//! operations, and decides semantic relations between them — equality,
//! containment, disjointness — on top of **Antimirov partial derivatives**
//! over a character-class-enriched term algebra.
//!
//! No capture groups, no anchors, no lookaround, no backreferences: this is
//! a decision procedure over a classical regular-expression algebra, not a
//! text scanner.
//!
//! ```
//! use rxset::Rx;
//!
//! let r = Rx::parse("ab*").unwrap();
//! assert!(r.accepts("abbbb"));
//! assert!(r.rejects(""));
//!
//! let s = Rx::parse("(aa)*|(aa)*a").unwrap();
//! assert!(Rx::parse("a*").unwrap().equiv(&s));
//! ```

mod algebra;
mod derive;
mod error;
mod letter_set;
mod membership;
mod parser;
mod relation;
mod repr;
mod size;
mod term;

pub use error::{Error, Result};
pub use letter_set::{LetterSet, VennPiece};
pub use size::Size;
pub use term::Rx;
