/*!

Spelling correction & fuzzy search based on the Symmetric Delete spelling
correction algorithm, with compound-aware multi-word correction and word
segmentation of noisy text.

#### Single word spelling correction

```rust
use symdel::{SymSpell, Verbosity};

let max_edit_distance_dictionary = 2; //maximum edit distance per dictionary precalculation
let mut symspell = SymSpell::new(1024, max_edit_distance_dictionary, 7, 1, 5).unwrap();

// word/frequency pairs, e.g. parsed from a frequency dictionary file
symspell.load_dictionary_line("house 231310420", 0, 1, " ");
symspell.load_dictionary_line("hours 23204982", 0, 1, " ");

//lookup suggestions for single-word input strings
let input_term = "hous";
let suggestion_verbosity = Verbosity::Closest; //Top, Closest, All
let max_edit_distance_lookup = 1; //max edit distance per lookup (<= max_edit_distance_dictionary)
let suggestions = symspell
    .lookup(input_term, suggestion_verbosity, max_edit_distance_lookup, false)
    .unwrap();
//suggestions ordered by edit distance, then by term frequency
assert_eq!("house", suggestions[0].term);
```

#### Compound aware multi-word spelling correction

```rust
use symdel::SymSpell;

let mut symspell = SymSpell::default();
for (term, count) in [
    ("where", 438_338_274i64),
    ("is", 4_705_743_816),
    ("the", 23_135_851_162),
    ("love", 251_686_314),
] {
    symspell.create_dictionary_entry(term, count, None);
}

//lookup suggestions for multi-word input strings (supports compound splitting & merging)
let input_sentence = "whereis th elove";
let max_edit_distance_lookup = 2; //max edit distance per lookup (per single word, not per whole input string)
let compound_suggestions = symspell
    .lookup_compound(input_sentence, max_edit_distance_lookup)
    .unwrap();
assert_eq!("where is the love", compound_suggestions[0].term);
```

#### Word segmentation of noisy text

```rust
use symdel::SymSpell;

let mut symspell = SymSpell::default();
for (term, count) in [
    ("the", 23_135_851_162i64),
    ("quick", 49_768_339),
    ("brown", 76_077_336),
    ("fox", 24_629_426),
] {
    symspell.create_dictionary_entry(term, count, None);
}

//word segmentation and correction for multi-word input strings with/without spaces
let result = symspell.word_segmentation("thequickbrownfox", 0).unwrap();
assert_eq!("the quick brown fox", result.corrected_string);
```

*/

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

mod chunk_array;
mod edit_distance;
mod error;
mod staging;
mod symspell;
mod test;

pub use chunk_array::ChunkArray;
pub use edit_distance::{
    to_distance, to_similarity, DamerauOsa, DistanceAlgorithm, EditDistance, Levenshtein,
};
pub use error::{Result, SymSpellError};
pub use staging::SuggestionStage;
pub use symspell::{
    parse_words, transfer_case, unicode_normalization_form_kc, Composition, Suggestion, SymSpell,
    Verbosity,
};
