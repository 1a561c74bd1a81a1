// SymSpell: Symmetric Delete spelling correction
//
// The Symmetric Delete spelling correction algorithm reduces the complexity of edit candidate generation and dictionary lookup
// for a given Damerau-Levenshtein distance. It is six orders of magnitude faster and language independent.
// Opposite to other algorithms only deletes are required, no transposes + replaces + inserts.
// Transposes + replaces + inserts of the input term are transformed into deletes of the dictionary term.
// Replaces and inserts are expensive and language dependent: e.g. Chinese has 70,000 Unicode Han characters!
//
// SymSpell supports compound splitting / decompounding of multi-word input strings with three cases:
// 1. mistakenly inserted space into a correct word led to two incorrect terms
// 2. mistakenly omitted space between two correct words led to one incorrect combined term
// 3. multiple independent input terms with/without spelling errors
//
// MIT License
// https://opensource.org/licenses/MIT

use std::cmp::{self, min, Ordering};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::edit_distance::{DistanceAlgorithm, EditDistance, FastVec};
use crate::error::{Result, SymSpellError};
use crate::staging::SuggestionStage;

// Number of all words in the corpus used to generate the frequency dictionary.
// This is used to calculate the word occurrence probability p from word counts
// c: p = c/N. N equals the sum of all counts c in the dictionary only if the
// dictionary is complete, but not if the dictionary is truncated or filtered.
const N: i64 = 1_024_908_267_229;

const DEFAULT_INITIAL_CAPACITY: usize = 82_765;
const DEFAULT_MAX_EDIT_DISTANCE: i64 = 2;
const DEFAULT_PREFIX_LENGTH: i64 = 7;
const DEFAULT_COUNT_THRESHOLD: i64 = 1;
const DEFAULT_COMPACT_LEVEL: u8 = 5;

/// Normalize ligatures: "scientiﬁc" "ﬁelds" "ﬁnal"
pub fn unicode_normalization_form_kc(input: &str) -> String {
    input.nfkc().collect()
}

/// Transfer the letter case char-wise from source to target string.
pub fn transfer_case(source: &str, target: &str) -> String {
    // source = "HeLLo WoRLd!";
    // target = "rustacean community!";
    // result = "RuSTacEaN community!";
    use itertools::EitherOrBoth;
    use itertools::Itertools;

    let mut result = String::new();
    for pair in source.chars().zip_longest(target.chars()) {
        match pair {
            EitherOrBoth::Both(s, t) => {
                if s.is_uppercase() {
                    result.extend(t.to_uppercase());
                } else {
                    // dictionary words are already lowercase
                    result.push(t);
                }
            }
            // only the source has characters left
            EitherOrBoth::Left(_) => (),
            // only the target has characters left, append unchanged
            EitherOrBoth::Right(t) => result.push(t),
        }
    }
    result
}

/// Parse a string into lowercased words, splitting at non-alphanumeric
/// characters except for underscore and apostrophes.
pub fn parse_words(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    let text_normalized = text.to_lowercase();
    let mut start = false;
    let mut start_pos = 0;

    for (pos, ch) in text_normalized.char_indices() {
        start = match ch {
            // start or continuation of a term
            token if token.is_alphanumeric() => {
                if !start {
                    start_pos = pos;
                }
                true
            }
            // underscore and apostrophes are part of the word
            '_' | '\'' | '’' => {
                if !start {
                    start_pos = pos;
                }
                true
            }
            // end of term
            _ => {
                if start {
                    terms.push(text_normalized[start_pos..pos].to_string());
                }
                false
            }
        };
    }
    if start {
        terms.push(text_normalized[start_pos..].to_string());
    }
    terms
}

fn len(s: &str) -> usize {
    s.chars().count()
}

fn remove(s: &str, index: usize) -> String {
    s.chars()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, ch)| ch)
        .collect()
}

fn slice(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end - start).collect()
}

fn suffix(s: &str, start: usize) -> String {
    s.chars().skip(start).collect()
}

fn at(s: &str, i: isize) -> Option<char> {
    if i < 0 {
        return None;
    }
    s.chars().nth(i as usize)
}

// Estimated count of an unknown word: C = 10 / 10^length, derived from the
// estimated word occurrence probability P = 10 / (N * 10^length) proposed by
// Peter Norvig in Natural Language Corpus Data, page 224.
// http://norvig.com/ngrams/ch14.pdf
fn unknown_word_count(term_length: usize) -> i64 {
    (10.0 / 10f64.powi(term_length as i32)) as i64
}

fn parse_entry<'a>(
    line: &'a str,
    term_index: usize,
    count_index: usize,
    separator: &str,
) -> Option<(&'a str, i64)> {
    let line_parts: Vec<&str> = line.split(separator).collect();
    if line_parts.len() <= cmp::max(term_index, count_index) {
        return None;
    }
    let count = line_parts[count_index].parse::<i64>().ok()?;
    Some((line_parts[term_index], count))
}

/// Spelling suggestion returned from lookup.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suggestion {
    /// The suggested correctly spelled word.
    pub term: String,
    /// Edit distance between searched for word and suggestion.
    pub distance: i64,
    /// Frequency of suggestion in the dictionary (a measure of how common the word is).
    pub count: i64,
}

impl Suggestion {
    pub fn empty() -> Suggestion {
        Suggestion {
            term: String::new(),
            distance: 0,
            count: 0,
        }
    }

    pub fn new(term: impl Into<String>, distance: i64, count: i64) -> Suggestion {
        Suggestion {
            term: term.into(),
            distance,
            count,
        }
    }
}

// Order by distance ascending, then by frequency count descending, then by
// term ascending, so result order is stable regardless of map iteration order.
impl Ord for Suggestion {
    fn cmp(&self, other: &Suggestion) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.count.cmp(&self.count))
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Suggestion) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Suggestion) -> bool {
        self.term == other.term && self.distance == other.distance && self.count == other.count
    }
}

impl Eq for Suggestion {}

/// Result of [`SymSpell::word_segmentation`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Composition {
    /// The input with word boundaries inserted, original spelling retained.
    pub segmented_string: String,
    /// The segmented input with misspelled words corrected.
    pub corrected_string: String,
    /// Edit distance sum between input string and corrected string.
    pub distance_sum: i64,
    /// Sum of word occurrence probabilities in log scale (a measure of how
    /// common and probable the corrected segmentation is).
    pub prob_log_sum: f64,
}

impl Composition {
    pub fn empty() -> Self {
        Self {
            segmented_string: String::new(),
            corrected_string: String::new(),
            distance_sum: 0,
            prob_log_sum: 0.0,
        }
    }
}

/// Controls the closeness/quantity of returned spelling suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Top suggestion with the highest term frequency of the suggestions of smallest edit distance found.
    Top,
    /// All suggestions of smallest edit distance found, suggestions ordered by term frequency.
    Closest,
    /// All suggestions within maxEditDistance, suggestions ordered by edit distance, then by term frequency (slower, no early termination).
    All,
}

/// SymSpell spell checker and corrector.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymSpell {
    // The expected number of words in the dictionary, used to pre-size maps.
    initial_capacity: usize,
    // Maximum edit distance for dictionary precalculation.
    max_dictionary_edit_distance: i64,
    // The length of word prefixes, from which deletes are generated. (5..7).
    prefix_length: i64,
    // The minimum frequency count for dictionary words to be considered valid for spelling correction.
    count_threshold: i64,
    // Mask applied to delete hashes; trades extra collisions for a smaller index.
    compact_mask: u32,
    distance_algorithm: DistanceAlgorithm,
    // Maximum dictionary term length.
    max_dictionary_word_length: i64,
    // Dictionary that contains a mapping of lists of suggested correction words to the hashes
    // of the original words and the deletes derived from them. Collisions of hashes are tolerated,
    // because suggestions are ultimately verified via an edit distance function.
    // A list of suggestions might have a single suggestion, or multiple suggestions.
    deletes: AHashMap<u32, Vec<Box<str>>>,
    // Dictionary of unique correct spelling words, and the frequency count for each word.
    words: AHashMap<Box<str>, i64>,
    // Dictionary of unique words that are below the count threshold for being considered correct spellings.
    below_threshold_words: AHashMap<Box<str>, i64>,
    // Bigrams optionally used for improved correction quality in lookup_compound.
    bigrams: AHashMap<Box<str>, i64>,
    // Minimum bigram count in the bigram dictionary, floor for unseen bigrams.
    bigram_count_min: i64,
}

impl SymSpell {
    /// Create a new SymSpell instance.
    ///
    /// # Arguments
    ///
    /// * `initial_capacity` - The expected number of words in the dictionary.
    /// * `max_dictionary_edit_distance` - Maximum edit distance for doing lookups.
    /// * `prefix_length` - The length of word prefixes used for spell checking.
    /// * `count_threshold` - The minimum frequency count for dictionary words to be considered correct spellings.
    /// * `compact_level` - Degree of favoring lower memory use over speed (0=fastest,most memory, 16=slowest,least memory).
    pub fn new(
        initial_capacity: usize,
        max_dictionary_edit_distance: i64,
        prefix_length: i64,
        count_threshold: i64,
        compact_level: u8,
    ) -> Result<Self> {
        if max_dictionary_edit_distance < 0 {
            return Err(SymSpellError::Config(
                "max_dictionary_edit_distance must not be negative",
            ));
        }
        if prefix_length < 1 || prefix_length < max_dictionary_edit_distance {
            return Err(SymSpellError::Config(
                "prefix_length must be positive and no smaller than max_dictionary_edit_distance",
            ));
        }
        if count_threshold < 0 {
            return Err(SymSpellError::Config("count_threshold must not be negative"));
        }
        if compact_level > 16 {
            return Err(SymSpellError::Config("compact_level must be in 0..=16"));
        }
        Ok(Self {
            initial_capacity,
            max_dictionary_edit_distance,
            prefix_length,
            count_threshold,
            compact_mask: (u32::MAX >> (3 + compact_level)) << 2,
            distance_algorithm: DistanceAlgorithm::DamerauOsa,
            max_dictionary_word_length: 0,
            deletes: AHashMap::with_capacity(initial_capacity),
            words: AHashMap::with_capacity(initial_capacity),
            below_threshold_words: AHashMap::new(),
            bigrams: AHashMap::new(),
            bigram_count_min: i64::MAX,
        })
    }

    /// Maximum edit distance for dictionary precalculation.
    pub fn max_dictionary_edit_distance(&self) -> i64 {
        self.max_dictionary_edit_distance
    }

    /// Length of prefix, from which deletes are generated.
    pub fn prefix_length(&self) -> i64 {
        self.prefix_length
    }

    /// Count threshold for a word to be considered a valid word for spelling correction.
    pub fn count_threshold(&self) -> i64 {
        self.count_threshold
    }

    /// Length of the longest word in the dictionary.
    pub fn max_length(&self) -> i64 {
        self.max_dictionary_word_length
    }

    /// Number of unique correct spelling words in the dictionary.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of word prefixes and intermediate word deletes encoded in the dictionary.
    pub fn entry_count(&self) -> usize {
        self.deletes.len()
    }

    /// Frequency count of a loaded bigram, if present.
    pub fn bigram_count(&self, bigram: &str) -> Option<i64> {
        self.bigrams.get(bigram).copied()
    }

    /// Create or update an entry in the dictionary.
    ///
    /// For every new correctly spelled word, deletes with an edit distance of
    /// 1..max_dictionary_edit_distance are derived from its prefix and added
    /// to the index, either directly or through `staging` (commit staged data
    /// with [`commit_staged`] afterwards). The dictionary may be dynamically
    /// updated (word frequency and new words) at any time.
    ///
    /// Returns `true` if the word was added as a new correctly spelled word,
    /// `false` if it was added as a below-threshold word or updated an
    /// existing entry.
    ///
    /// [`commit_staged`]: SymSpell::commit_staged
    pub fn create_dictionary_entry(
        &mut self,
        key: impl AsRef<str>,
        count: i64,
        staging: Option<&mut SuggestionStage>,
    ) -> bool {
        let key = key.as_ref();
        let mut count = count;
        if count <= 0 {
            // no point adding a word with a count of 0, unless the threshold
            // admits such words
            if self.count_threshold > 0 {
                return false;
            }
            count = 0;
        }

        // previously seen correct word: only accumulate the count
        if let Some(previous_count) = self.words.get_mut(key) {
            *previous_count = previous_count.saturating_add(count);
            return false;
        }

        // below-threshold tracking exists only when the threshold leaves room
        // below itself
        if self.count_threshold > 1 {
            if let Some(&previous_count) = self.below_threshold_words.get(key) {
                count = previous_count.saturating_add(count);
                if count < self.count_threshold {
                    self.below_threshold_words.insert(key.into(), count);
                    return false;
                }
                // reached the threshold: promote to a correct word below
                self.below_threshold_words.remove(key);
            } else if count < self.count_threshold {
                self.below_threshold_words.insert(key.into(), count);
                return false;
            }
        }

        // what we have at this point is a new, above threshold word
        self.words.insert(key.into(), count);

        let key_len = len(key) as i64;
        if key_len > self.max_dictionary_word_length {
            self.max_dictionary_word_length = key_len;
        }

        // deletes are created only once, no matter how often the word occurs
        let edits = self.edits_prefix(key);
        match staging {
            Some(staging) => {
                for delete in &edits {
                    staging.add(self.get_string_hash(delete), key);
                }
            }
            None => {
                for delete in &edits {
                    let delete_hash = self.get_string_hash(delete);
                    self.deletes.entry(delete_hash).or_default().push(key.into());
                }
            }
        }
        true
    }

    /// Remove all below-threshold words from the dictionary.
    ///
    /// This can be used to reduce memory consumption after populating the
    /// dictionary from a corpus with [`create_dictionary`].
    ///
    /// [`create_dictionary`]: SymSpell::create_dictionary
    pub fn purge_below_threshold_words(&mut self) {
        self.below_threshold_words.clear();
    }

    /// Commit staged dictionary additions into the index.
    pub fn commit_staged(&mut self, staging: &mut SuggestionStage) {
        staging.commit_to(&mut self.deletes);
    }

    /// Load multiple dictionary entries from a file of word/frequency count pairs.
    /// Merges with any dictionary data already loaded.
    ///
    /// Returns `false` if the file could not be opened, `true` otherwise.
    ///
    /// # Arguments
    ///
    /// * `corpus` - The path of the file.
    /// * `term_index` - The column position of the word.
    /// * `count_index` - The column position of the frequency count.
    /// * `separator` - Separator between columns.
    pub fn load_dictionary(
        &mut self,
        corpus: impl AsRef<Path>,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> bool {
        let Ok(file) = File::open(corpus.as_ref()) else {
            return false;
        };
        self.load_dictionary_stream(BufReader::new(file), term_index, count_index, separator)
            .is_ok()
    }

    /// Load multiple dictionary entries from a stream of word/frequency count
    /// pairs. Additions are staged and committed in one pass at the end.
    /// Lines that do not parse are skipped.
    pub fn load_dictionary_stream<R: BufRead>(
        &mut self,
        reader: R,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<()> {
        let mut staging = SuggestionStage::new(self.initial_capacity);
        for line in reader.lines() {
            let line = line?;
            if let Some((term, count)) = parse_entry(line.trim(), term_index, count_index, separator)
            {
                let term = term.to_string();
                self.create_dictionary_entry(term, count, Some(&mut staging));
            }
        }
        self.commit_staged(&mut staging);
        debug!(
            words = self.words.len(),
            entries = self.deletes.len(),
            "dictionary loaded"
        );
        Ok(())
    }

    /// Load a single dictionary entry from a word/frequency count pair.
    ///
    /// Returns `true` if the line parsed as an entry.
    pub fn load_dictionary_line(
        &mut self,
        line: &str,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> bool {
        match parse_entry(line.trim(), term_index, count_index, separator) {
            Some((term, count)) => {
                let term = term.to_string();
                self.create_dictionary_entry(term, count, None);
                true
            }
            None => false,
        }
    }

    /// Load multiple bigram entries from a file of bigram/frequency count pairs.
    /// Only used by [`lookup_compound`] for improved correction quality.
    ///
    /// Returns `false` if the file could not be opened, `true` otherwise.
    ///
    /// [`lookup_compound`]: SymSpell::lookup_compound
    pub fn load_bigram_dictionary(
        &mut self,
        corpus: impl AsRef<Path>,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> bool {
        let Ok(file) = File::open(corpus.as_ref()) else {
            return false;
        };
        self.load_bigram_dictionary_stream(BufReader::new(file), term_index, count_index, separator)
            .is_ok()
    }

    /// Load multiple bigram entries from a stream of bigram/frequency count
    /// pairs. Lines that do not parse are skipped.
    pub fn load_bigram_dictionary_stream<R: BufRead>(
        &mut self,
        reader: R,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<()> {
        for line in reader.lines() {
            let line = line?;
            self.load_bigram_dictionary_line(line.trim(), term_index, count_index, separator);
        }
        debug!(bigrams = self.bigrams.len(), "bigram dictionary loaded");
        Ok(())
    }

    /// Load a single bigram entry from a bigram/frequency count pair. With a
    /// space separator the bigram occupies two consecutive columns starting
    /// at `term_index`; with any other separator it occupies one column.
    ///
    /// Returns `true` if the line parsed as an entry.
    pub fn load_bigram_dictionary_line(
        &mut self,
        line: &str,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> bool {
        let line_parts: Vec<&str> = line.split(separator).collect();
        let (key_parts, min_parts) = if separator == " " { (2, 3) } else { (1, 2) };
        if line_parts.len() < min_parts
            || line_parts.len() <= cmp::max(term_index + key_parts - 1, count_index)
        {
            return false;
        }
        let Ok(count) = line_parts[count_index].parse::<i64>() else {
            return false;
        };
        let key = line_parts[term_index..term_index + key_parts].join(" ");
        self.bigrams.insert(key.into_boxed_str(), count);
        if count < self.bigram_count_min {
            self.bigram_count_min = count;
        }
        true
    }

    /// Load dictionary words from a file containing plain text, each word
    /// counting once per occurrence. Merges with any dictionary data already
    /// loaded.
    ///
    /// Returns `false` if the file could not be opened, `true` otherwise.
    pub fn create_dictionary(&mut self, corpus: impl AsRef<Path>) -> bool {
        let Ok(file) = File::open(corpus.as_ref()) else {
            return false;
        };
        self.create_dictionary_stream(BufReader::new(file)).is_ok()
    }

    /// Load dictionary words from a stream containing plain text.
    pub fn create_dictionary_stream<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut staging = SuggestionStage::new(self.initial_capacity);
        for line in reader.lines() {
            let line = line?;
            for key in parse_words(&line) {
                self.create_dictionary_entry(key, 1, Some(&mut staging));
            }
        }
        self.commit_staged(&mut staging);
        debug!(
            words = self.words.len(),
            entries = self.deletes.len(),
            "dictionary created from corpus"
        );
        Ok(())
    }

    /// Find suggested spellings for a given input word.
    ///
    /// Returns suggestions sorted by edit distance ascending, then frequency
    /// count descending. With `include_unknown`, an input without any
    /// suggestion within `max_edit_distance` is returned as a synthetic
    /// suggestion at distance `max_edit_distance + 1` with count 0.
    ///
    /// # Arguments
    ///
    /// * `input` - The word being spell checked.
    /// * `verbosity` - The value controlling the quantity/closeness of the returned suggestions.
    /// * `max_edit_distance` - The maximum edit distance between input and suggested words.
    /// * `include_unknown` - Include the input word in the result, if no words within edit distance are found.
    ///
    /// # Examples
    ///
    /// ```
    /// use symdel::{SymSpell, Verbosity};
    ///
    /// let mut symspell = SymSpell::default();
    /// symspell.create_dictionary_entry("house", 231_310_420, None);
    /// let suggestions = symspell.lookup("hous", Verbosity::Closest, 2, false).unwrap();
    /// assert_eq!("house", suggestions[0].term);
    /// assert_eq!(1, suggestions[0].distance);
    /// ```
    pub fn lookup(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: i64,
        include_unknown: bool,
    ) -> Result<Vec<Suggestion>> {
        if max_edit_distance < 0 || max_edit_distance > self.max_dictionary_edit_distance {
            return Err(SymSpellError::Argument(
                "max_edit_distance must be in 0..=max_dictionary_edit_distance",
            ));
        }
        let mut suggestions = self.lookup_core(input, verbosity, max_edit_distance);
        if include_unknown && suggestions.is_empty() {
            suggestions.push(Suggestion::new(input, max_edit_distance + 1, 0));
        }
        Ok(suggestions)
    }

    fn lookup_core(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: i64,
    ) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = Vec::new();
        let input_len = len(input) as i64;

        // early termination - word is too big to possibly match any dictionary word
        if input_len - max_edit_distance > self.max_dictionary_word_length {
            return suggestions;
        }

        if let Some(&suggestion_count) = self.words.get(input) {
            suggestions.push(Suggestion::new(input, 0, suggestion_count));
            // early termination - return exact match, unless caller wants all matches
            if verbosity != Verbosity::All {
                return suggestions;
            }
        }

        // early termination when we only need to know whether the word is in
        // the dictionary, e.g. for word segmentation
        if max_edit_distance == 0 {
            return suggestions;
        }

        let mut considered_deletes: AHashSet<String> = AHashSet::new();
        let mut considered_suggestions: AHashSet<String> = AHashSet::new();
        // the input was checked against `words` above
        considered_suggestions.insert(input.to_string());

        // lowered as better suggestions are found
        let mut max_edit_distance2 = max_edit_distance;
        let mut candidate_pointer = 0;
        let mut candidates: Vec<String> = Vec::new();

        let mut input_prefix_len = input_len;
        if input_prefix_len > self.prefix_length {
            input_prefix_len = self.prefix_length;
            candidates.push(slice(input, 0, input_prefix_len as usize));
        } else {
            candidates.push(input.to_string());
        }

        let mut distance_comparer = EditDistance::new(self.distance_algorithm);

        while candidate_pointer < candidates.len() {
            let candidate = candidates[candidate_pointer].clone();
            candidate_pointer += 1;
            let candidate_len = len(&candidate) as i64;
            let length_diff = input_prefix_len - candidate_len;

            // candidates are enqueued by nondecreasing delete distance, so once
            // the gap exceeds the current bound no closer suggestion can follow
            if length_diff > max_edit_distance2 {
                if verbosity == Verbosity::All {
                    continue;
                }
                break;
            }

            if let Some(dict_suggestions) = self.deletes.get(&self.get_string_hash(&candidate)) {
                for suggestion in dict_suggestions {
                    let suggestion = suggestion.as_ref();
                    if suggestion == input {
                        continue;
                    }
                    let suggestion_len = len(suggestion) as i64;

                    if (suggestion_len - input_len).abs() > max_edit_distance2
                        || suggestion_len < candidate_len
                        || (suggestion_len == candidate_len && suggestion != candidate)
                    {
                        continue;
                    }

                    let sugg_prefix_len = min(suggestion_len, self.prefix_length);
                    if sugg_prefix_len > input_prefix_len
                        && sugg_prefix_len - candidate_len > max_edit_distance2
                    {
                        continue;
                    }

                    // We allow simultaneous edits (deletes) of max_edit_distance on both
                    // the dictionary and the input term. For replaces and adjacent
                    // transposes the resulting edit distance stays <= max_edit_distance;
                    // for inserts and deletes it might exceed it, so the true distance
                    // must be verified.
                    // Example: bank==bnak and bank==bink, but bank!=kanb and bank!=xban
                    // and bank!=baxn for max_edit_distance=1.
                    let distance;
                    if candidate_len == 0 {
                        // suggestions which share no characters with the input can only
                        // meet through the empty delete
                        distance = cmp::max(input_len, suggestion_len);
                        if distance > max_edit_distance2
                            || !considered_suggestions.insert(suggestion.to_string())
                        {
                            continue;
                        }
                    } else if suggestion_len == 1 {
                        distance = if !input.contains(suggestion) {
                            input_len
                        } else {
                            input_len - 1
                        };
                        if distance > max_edit_distance2
                            || !considered_suggestions.insert(suggestion.to_string())
                        {
                            continue;
                        }
                    // number of edits in prefix == max_edit_distance AND no identical
                    // suffix: then edit distance > max_edit_distance and there is no
                    // need for the edit distance calculation
                    // (input_len >= prefix_length) && (suggestion_len >= prefix_length)
                    } else if self.has_different_suffix(
                        max_edit_distance,
                        input,
                        input_len,
                        candidate_len,
                        suggestion,
                        suggestion_len,
                    ) {
                        continue;
                    } else {
                        // delete_in_suggestion_prefix is somewhat expensive, and only
                        // pays off when verbosity is Top or Closest
                        if verbosity != Verbosity::All
                            && !self.delete_in_suggestion_prefix(&candidate, suggestion)
                        {
                            continue;
                        }
                        if !considered_suggestions.insert(suggestion.to_string()) {
                            continue;
                        }
                        distance = distance_comparer.compare(input, suggestion, max_edit_distance2);
                        if distance < 0 {
                            continue;
                        }
                    }

                    // do not process higher distances than those already found, if
                    // verbosity < All (max_edit_distance2 always equals
                    // max_edit_distance when Verbosity::All)
                    if distance <= max_edit_distance2 {
                        let suggestion_count = self.words[suggestion];
                        let si = Suggestion::new(suggestion, distance, suggestion_count);
                        if !suggestions.is_empty() {
                            match verbosity {
                                Verbosity::Closest => {
                                    // only suggestions at the smallest distance found
                                    // so far survive
                                    if distance < max_edit_distance2 {
                                        suggestions.clear();
                                    }
                                }
                                Verbosity::Top => {
                                    if distance < max_edit_distance2
                                        || suggestion_count > suggestions[0].count
                                    {
                                        max_edit_distance2 = distance;
                                        suggestions[0] = si;
                                    }
                                    continue;
                                }
                                Verbosity::All => (),
                            }
                        }
                        if verbosity != Verbosity::All {
                            max_edit_distance2 = distance;
                        }
                        suggestions.push(si);
                    }
                }
            }

            // derive deletes from the candidate and enqueue them, until the
            // maximum edit distance has been reached
            if length_diff < max_edit_distance && candidate_len <= self.prefix_length {
                // do not create edits with an edit distance larger than that of
                // suggestions already found
                if verbosity != Verbosity::All && length_diff >= max_edit_distance2 {
                    continue;
                }
                for i in 0..candidate_len as usize {
                    let delete = remove(&candidate, i);
                    if considered_deletes.insert(delete.clone()) {
                        candidates.push(delete);
                    }
                }
            }
        }

        // sort by ascending edit distance, then by descending word frequency
        if suggestions.len() > 1 {
            suggestions.sort();
        }
        suggestions
    }

    /// Find suggested spellings for a multi-word input string, supporting
    /// word splitting and merging.
    ///
    /// Handles three cases:
    /// 1. mistakenly inserted space into a correct word led to two incorrect terms
    /// 2. mistakenly omitted space between two correct words led to one incorrect combined term
    /// 3. multiple independent input terms with/without spelling errors
    ///
    /// Returns a single suggestion whose term is the corrected sentence,
    /// whose distance is the edit distance to the input and whose count
    /// encodes the aggregate probability of the correction.
    ///
    /// # Examples
    ///
    /// ```
    /// use symdel::SymSpell;
    ///
    /// let mut symspell = SymSpell::default();
    /// for (term, count) in [
    ///     ("where", 438_338_274i64),
    ///     ("is", 4_705_743_816),
    ///     ("the", 23_135_851_162),
    ///     ("love", 251_686_314),
    /// ] {
    ///     symspell.create_dictionary_entry(term, count, None);
    /// }
    /// let suggestions = symspell.lookup_compound("whereis th elove", 2).unwrap();
    /// assert_eq!("where is the love", suggestions[0].term);
    /// ```
    pub fn lookup_compound(&self, input: &str, max_edit_distance: i64) -> Result<Vec<Suggestion>> {
        if max_edit_distance < 0 || max_edit_distance > self.max_dictionary_edit_distance {
            return Err(SymSpellError::Argument(
                "max_edit_distance must be in 0..=max_dictionary_edit_distance",
            ));
        }

        // parse input string into single terms
        let terms = parse_words(input);

        let mut suggestion_parts: Vec<Suggestion> = Vec::new();
        let mut distance_comparer = EditDistance::new(self.distance_algorithm);

        // translate every term to its best suggestion, otherwise it remains unchanged
        let mut last_combi = false;
        for (i, term) in terms.iter().enumerate() {
            let suggestions = self.lookup_core(term, Verbosity::Top, max_edit_distance);

            // combi check, always before split
            if i > 0 && !last_combi {
                let combined = [terms[i - 1].as_str(), term.as_str()].concat();
                let mut suggestions_combi =
                    self.lookup_core(&combined, Verbosity::Top, max_edit_distance);

                if !suggestions_combi.is_empty() {
                    let best1 = suggestion_parts[suggestion_parts.len() - 1].clone();
                    let best2 = match suggestions.first() {
                        Some(si) => si.clone(),
                        // unknown word: estimated edit distance and count
                        None => Suggestion::new(
                            term.as_str(),
                            max_edit_distance + 1,
                            unknown_word_count(len(term)),
                        ),
                    };

                    // distance1 = edit distance between the two split terms and their
                    // best corrections, as comparative value for the combination
                    let distance1 = best1.distance + best2.distance;
                    if suggestions_combi[0].distance + 1 < distance1
                        || (suggestions_combi[0].distance + 1 == distance1
                            && suggestions_combi[0].count
                                > (best1.count as f64 / N as f64 * best2.count as f64) as i64)
                    {
                        suggestions_combi[0].distance += 1;
                        let last = suggestion_parts.len() - 1;
                        suggestion_parts[last] = suggestions_combi[0].clone();
                        last_combi = true;
                        continue;
                    }
                }
            }
            last_combi = false;

            // always split terms without suggestion, never split terms with a
            // distance-0 suggestion, never split single-char terms
            if !suggestions.is_empty() && (suggestions[0].distance == 0 || len(term) == 1) {
                // choose the best suggestion
                suggestion_parts.push(suggestions[0].clone());
                continue;
            }

            // if no perfect suggestion, split the word into pairs
            let mut suggestion_split_best = match suggestions.first() {
                Some(si) => si.clone(),
                None => Suggestion::empty(),
            };

            let term_length = len(term);
            if term_length > 1 {
                for j in 1..term_length {
                    let part1 = slice(term, 0, j);
                    let part2 = slice(term, j, term_length);
                    let suggestions1 = self.lookup_core(&part1, Verbosity::Top, max_edit_distance);
                    if suggestions1.is_empty() {
                        continue;
                    }
                    let suggestions2 = self.lookup_core(&part2, Verbosity::Top, max_edit_distance);
                    if suggestions2.is_empty() {
                        continue;
                    }

                    // best suggestion for the split pair
                    let split_term =
                        [suggestions1[0].term.as_str(), suggestions2[0].term.as_str()].join(" ");

                    let mut distance2 =
                        distance_comparer.compare(term, &split_term, max_edit_distance);
                    if distance2 < 0 {
                        distance2 = max_edit_distance + 1;
                    }

                    if !suggestion_split_best.term.is_empty() {
                        if distance2 > suggestion_split_best.distance {
                            continue;
                        }
                        if distance2 < suggestion_split_best.distance {
                            suggestion_split_best = Suggestion::empty();
                        }
                    }

                    let bigram_count = match self.bigrams.get(&*split_term) {
                        // the pair exists in the bigram dictionary
                        Some(&bigram_frequency) => {
                            // boost the count when the split corrections are part of,
                            // or identical to, the input
                            if let Some(best_si) = suggestions.first() {
                                if split_term == *term {
                                    // make the count bigger than the count of the
                                    // single-term correction
                                    cmp::max(bigram_frequency, best_si.count + 2)
                                } else if suggestions1[0].term == best_si.term
                                    || suggestions2[0].term == best_si.term
                                {
                                    cmp::max(bigram_frequency, best_si.count + 1)
                                } else {
                                    bigram_frequency
                                }
                            } else if split_term == *term {
                                cmp::max(
                                    bigram_frequency,
                                    cmp::max(suggestions1[0].count, suggestions2[0].count) + 2,
                                )
                            } else {
                                bigram_frequency
                            }
                        }
                        None => {
                            // The Naive Bayes probability of the word combination is the
                            // product of the two word probabilities: P(AB) = P(A) * P(B).
                            // Use it to estimate the frequency count of the combination,
                            // which then ranks the best splitting variant.
                            min(
                                self.bigram_count_min,
                                (suggestions1[0].count as f64 / N as f64
                                    * suggestions2[0].count as f64) as i64,
                            )
                        }
                    };

                    let suggestion_split = Suggestion::new(split_term, distance2, bigram_count);
                    if suggestion_split_best.term.is_empty()
                        || suggestion_split.count > suggestion_split_best.count
                    {
                        suggestion_split_best = suggestion_split;
                    }
                }

                if !suggestion_split_best.term.is_empty() {
                    suggestion_parts.push(suggestion_split_best);
                } else {
                    suggestion_parts.push(Suggestion::new(
                        term.as_str(),
                        max_edit_distance + 1,
                        unknown_word_count(term_length),
                    ));
                }
            } else {
                suggestion_parts.push(Suggestion::new(
                    term.as_str(),
                    max_edit_distance + 1,
                    unknown_word_count(term_length),
                ));
            }
        }

        let mut joined = String::new();
        let mut tmp_count = N as f64;
        for si in &suggestion_parts {
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(&si.term);
            tmp_count *= si.count as f64 / N as f64;
        }

        let mut suggestion = Suggestion::new(joined, 0, tmp_count as i64);
        suggestion.distance = distance_comparer.distance(input, &suggestion.term);
        Ok(vec![suggestion])
    }

    /// Divide a string into words by inserting missing spaces at the
    /// appropriate positions, correcting misspelled words at the same time.
    ///
    /// Existing spaces are allowed and considered for optimum segmentation.
    /// While each string of length n can be segmented into 2^n-1 possible
    /// compositions, the optimum composition is found in linear time with a
    /// flat loop over a circular buffer, no recursion.
    ///
    /// # Examples
    ///
    /// ```
    /// use symdel::SymSpell;
    ///
    /// let mut symspell = SymSpell::default();
    /// for (term, count) in [
    ///     ("the", 23_135_851_162i64),
    ///     ("quick", 49_768_339),
    ///     ("brown", 76_077_336),
    ///     ("fox", 24_629_426),
    /// ] {
    ///     symspell.create_dictionary_entry(term, count, None);
    /// }
    /// let composition = symspell.word_segmentation("thequickbrownfox", 0).unwrap();
    /// assert_eq!("the quick brown fox", composition.corrected_string);
    /// ```
    pub fn word_segmentation(&self, input: &str, max_edit_distance: i64) -> Result<Composition> {
        self.word_segmentation_with_word_length(
            input,
            max_edit_distance,
            self.max_dictionary_word_length,
        )
    }

    /// [`word_segmentation`] with an explicit bound on the length of the
    /// words considered for segments.
    ///
    /// [`word_segmentation`]: SymSpell::word_segmentation
    pub fn word_segmentation_with_word_length(
        &self,
        input: &str,
        max_edit_distance: i64,
        max_segmentation_word_length: i64,
    ) -> Result<Composition> {
        if max_edit_distance < 0 || max_edit_distance > self.max_dictionary_edit_distance {
            return Err(SymSpellError::Argument(
                "max_edit_distance must be in 0..=max_dictionary_edit_distance",
            ));
        }
        if max_segmentation_word_length < 1 {
            return Err(SymSpellError::Argument(
                "max_segmentation_word_length must be positive",
            ));
        }

        // normalize ligatures: "scientiﬁc" "ﬁelds" "ﬁnal"
        let input = unicode_normalization_form_kc(input);
        let input_len = len(&input);
        if input_len == 0 {
            return Ok(Composition::empty());
        }

        let array_size = min(max_segmentation_word_length as usize, input_len);
        let mut compositions: Vec<Composition> = vec![Composition::empty(); array_size];
        let mut circular_index = array_size - 1;

        // outer loop (column): all possible part start positions
        for j in 0..input_len {
            // inner loop (row): all possible part lengths (from the start
            // position): a part can't be longer than the longest word in the
            // dictionary (other than a long unknown word)
            let imax = min(input_len - j, max_segmentation_word_length as usize);
            for i in 1..=imax {
                // get the top spelling correction and edit distance for the part
                let mut part = slice(&input, j, j + i);
                let mut separator_len: i64 = 0;
                let mut top_ed: i64 = 0;

                if part.chars().next().is_some_and(char::is_whitespace) {
                    // remove the space for the edit distance calculation
                    part = remove(&part, 0);
                } else {
                    // the space did not exist and has to be inserted
                    separator_len = 1;
                }

                // remove interior spaces, charging one edit apiece
                top_ed += len(&part) as i64;
                part = part.replace(' ', "");
                top_ed -= len(&part) as i64;

                // the lookup is case-insensitive; the original case is restored below
                let results =
                    self.lookup_core(&part.to_lowercase(), Verbosity::Top, max_edit_distance);
                let (top_result, top_prob_log) = if let Some(best) = results.first() {
                    top_ed += best.distance;
                    // preserve the letter case of the input during correction
                    let corrected = if best.distance > 0 {
                        transfer_case(&part, &best.term)
                    } else {
                        part.clone()
                    };
                    // Naive Bayes Rule: word probabilities are assumed independent, so
                    // the probability of a word combination is the product of the word
                    // probabilities. Summing logarithms instead of multiplying keeps
                    // the products of many ~10^-10 probabilities from underflowing.
                    // log(a*b) = log(a) + log(b)
                    (corrected, (best.count as f64 / N as f64).log10())
                } else {
                    // unknown word: length-penalized probability estimate, otherwise a
                    // long input would win as one long unknown word even though many
                    // spaces should have been inserted
                    let part_len = len(&part) as i64;
                    top_ed += part_len;
                    (
                        part.clone(),
                        (10.0 / (N as f64 * 10f64.powi(part_len as i32))).log10(),
                    )
                };

                let destination_index = (i + circular_index) % array_size;
                if j == 0 {
                    // set values in the first round
                    compositions[destination_index] = Composition {
                        segmented_string: part,
                        corrected_string: top_result,
                        distance_sum: top_ed,
                        prob_log_sum: top_prob_log,
                    };
                } else if i as i64 == max_segmentation_word_length
                    // replace values if a better prob_log_sum exists at the same edit
                    // distance, with or without the separator edit
                    || (((compositions[circular_index].distance_sum + top_ed
                        == compositions[destination_index].distance_sum)
                        || (compositions[circular_index].distance_sum + separator_len + top_ed
                            == compositions[destination_index].distance_sum))
                        && (compositions[destination_index].prob_log_sum
                            < compositions[circular_index].prob_log_sum + top_prob_log))
                    // replace values on a smaller edit distance
                    || (compositions[circular_index].distance_sum + separator_len + top_ed
                        < compositions[destination_index].distance_sum)
                {
                    let previous = &compositions[circular_index];
                    let replacement = Composition {
                        segmented_string: [previous.segmented_string.as_str(), part.as_str()]
                            .join(" "),
                        corrected_string: [previous.corrected_string.as_str(), top_result.as_str()]
                            .join(" "),
                        distance_sum: previous.distance_sum + separator_len + top_ed,
                        prob_log_sum: previous.prob_log_sum + top_prob_log,
                    };
                    compositions[destination_index] = replacement;
                }
            }
            circular_index = (circular_index + 1) % array_size;
        }
        Ok(compositions[circular_index].clone())
    }

    // Check whether all delete chars are present in the suggestion prefix in
    // the correct order, otherwise this is just a hash collision.
    fn delete_in_suggestion_prefix(&self, delete: &str, suggestion: &str) -> bool {
        if delete.is_empty() {
            return true;
        }
        let suggestion: FastVec<char> = suggestion
            .chars()
            .take(self.prefix_length as usize)
            .collect();
        let mut j = 0;
        for del_char in delete.chars() {
            while j < suggestion.len() && del_char != suggestion[j] {
                j += 1;
            }
            if j == suggestion.len() {
                return false;
            }
        }
        true
    }

    // When the candidate consumed the entire edit budget inside the prefix and
    // the suffixes disagree, the true distance exceeds max_edit_distance and
    // the edit distance calculation can be skipped.
    fn has_different_suffix(
        &self,
        max_edit_distance: i64,
        input: &str,
        input_len: i64,
        candidate_len: i64,
        suggestion: &str,
        suggestion_len: i64,
    ) -> bool {
        let min_suffix = if self.prefix_length - max_edit_distance == candidate_len {
            min(input_len, suggestion_len) - self.prefix_length
        } else {
            0
        };

        (self.prefix_length - max_edit_distance == candidate_len)
            && ((min_suffix - self.prefix_length > 1)
                && (suffix(input, (input_len + 1 - min_suffix) as usize)
                    != suffix(suggestion, (suggestion_len + 1 - min_suffix) as usize)))
            || ((min_suffix > 0)
                && (at(input, (input_len - min_suffix) as isize)
                    != at(suggestion, (suggestion_len - min_suffix) as isize))
                && ((at(input, (input_len - min_suffix - 1) as isize)
                    != at(suggestion, (suggestion_len - min_suffix) as isize))
                    || (at(input, (input_len - min_suffix) as isize)
                        != at(suggestion, (suggestion_len - min_suffix - 1) as isize))))
    }

    // Generate all delete variants of the word's prefix region up to
    // max_dictionary_edit_distance.
    fn edits_prefix(&self, key: &str) -> AHashSet<String> {
        let mut delete_words = AHashSet::new();
        let key_len = len(key) as i64;

        // short words can be deleted away entirely
        if key_len <= self.max_dictionary_edit_distance {
            delete_words.insert(String::new());
        }

        let prefix = if key_len > self.prefix_length {
            slice(key, 0, self.prefix_length as usize)
        } else {
            key.to_string()
        };
        delete_words.insert(prefix.clone());
        self.edits(prefix, &mut delete_words);
        delete_words
    }

    // Inexpensive and language independent: only deletes, no transposes +
    // replaces + inserts. Breadth-first; each layer removes one more character.
    fn edits(&self, word: String, delete_words: &mut AHashSet<String>) {
        let mut layer = vec![word];
        for _ in 0..self.max_dictionary_edit_distance {
            let mut next_layer = Vec::new();
            for word in &layer {
                let word_len = len(word);
                if word_len <= 1 {
                    continue;
                }
                for i in 0..word_len {
                    let delete = remove(word, i);
                    if delete_words.insert(delete.clone()) {
                        next_layer.push(delete);
                    }
                }
            }
            if next_layer.is_empty() {
                break;
            }
            layer = next_layer;
        }
    }

    // Deterministic 32-bit hash of a delete variant, folded with the compact
    // mask. The low bits carry the term length, which keeps terms of clearly
    // different lengths from colliding at no space cost.
    pub(crate) fn get_string_hash(&self, s: &str) -> u32 {
        let mut hash: u32 = 2_166_136_261;
        let mut char_len: usize = 0;
        for ch in s.chars() {
            hash ^= ch as u32;
            hash = hash.wrapping_mul(16_777_619);
            char_len += 1;
        }
        let len_mask = (char_len & 0xF) as u32;
        (hash & self.compact_mask) | len_mask
    }
}

impl Default for SymSpell {
    fn default() -> Self {
        Self::new(
            DEFAULT_INITIAL_CAPACITY,
            DEFAULT_MAX_EDIT_DISTANCE,
            DEFAULT_PREFIX_LENGTH,
            DEFAULT_COUNT_THRESHOLD,
            DEFAULT_COMPACT_LEVEL,
        )
        .expect("default configuration is valid")
    }
}
