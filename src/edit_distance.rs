// Bounded edit distance kernels in the style of SoftWx.Match: common
// prefix/suffix trimming, a single reusable cost row, and a banded DP that
// only touches the diagonal window allowed by the distance bound.
//
// The Damerau-Levenshtein kernel is the optimal string alignment (OSA)
// variant: adjacent transpositions count as one edit, but no substring is
// edited more than once. "CA" to "ABC" is distance 2 for unrestricted
// Damerau-Levenshtein, but 3 here.

use std::cmp;
use std::mem;

use smallvec::SmallVec;

use crate::error::{Result, SymSpellError};

const VEC_SIZE: usize = 16;
pub type FastVec<T> = SmallVec<[T; VEC_SIZE]>;

/// Supported edit distance algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceAlgorithm {
    /// Classic Levenshtein: insertions, deletions, substitutions.
    Levenshtein,
    /// Damerau-Levenshtein, optimal string alignment variant.
    DamerauOsa,
}

/// Convert an edit distance into a similarity in `0.0..=1.0`
/// (`1 - distance / length`), where `length` is the length of the longer
/// string. A negative distance (bound exceeded) maps to `-1.0`.
pub fn to_similarity(distance: i64, length: usize) -> f64 {
    if distance < 0 {
        -1.0
    } else {
        1.0 - distance as f64 / length as f64
    }
}

/// Convert a minimum similarity into the equivalent maximum edit distance
/// for strings of the given longer-string length.
pub fn to_distance(similarity: f64, length: usize) -> i64 {
    (length as f64 * (1.0 - similarity) + 1e-10) as i64
}

// Shared null handling: with one side empty the distance is the other side's
// length, capped by the bound.
fn null_distance_results(len1: usize, len2: usize, max_distance: i64) -> i64 {
    let len = if len1 == 0 { len2 } else { len1 };
    if len as i64 <= max_distance {
        len as i64
    } else {
        -1
    }
}

// Starting position and trimmed lengths with the common prefix and suffix
// excluded. Expects s1.len() <= s2.len().
fn prefix_suffix_prep(s1: &[char], s2: &[char]) -> (usize, usize, usize) {
    let mut len1 = s1.len();
    let mut len2 = s2.len();
    while len1 != 0 && s1[len1 - 1] == s2[len2 - 1] {
        len1 -= 1;
        len2 -= 1;
    }
    let mut start = 0;
    while start != len1 && s1[start] == s2[start] {
        start += 1;
    }
    if start != 0 {
        len1 -= start;
        len2 -= start;
    }
    (len1, len2, start)
}

/// Levenshtein distance with reusable cost buffers.
///
/// The buffers grow monotonically to the longest trimmed string seen, so a
/// long-lived instance performs no per-call allocation once warmed up. Not
/// thread safe; give each thread its own instance.
pub struct Levenshtein {
    base_char1_costs: Vec<i64>,
}

impl Levenshtein {
    pub fn new() -> Self {
        Self {
            base_char1_costs: Vec::new(),
        }
    }

    /// Create an instance pre-sized for strings up to `expected_max_length`
    /// characters.
    pub fn with_expected_max_length(expected_max_length: usize) -> Result<Self> {
        if expected_max_length == 0 {
            return Err(SymSpellError::Argument(
                "expected_max_length must be larger than 0",
            ));
        }
        Ok(Self {
            base_char1_costs: vec![0; expected_max_length],
        })
    }

    fn ensure(&mut self, len2: usize) {
        if self.base_char1_costs.len() < len2 {
            self.base_char1_costs.resize(len2, 0);
        }
    }

    /// Compute the Levenshtein distance between two strings.
    pub fn distance(&mut self, string1: &str, string2: &str) -> i64 {
        let mut s1: FastVec<char> = string1.chars().collect();
        let mut s2: FastVec<char> = string2.chars().collect();
        if s1.is_empty() {
            return s2.len() as i64;
        }
        if s2.is_empty() {
            return s1.len() as i64;
        }
        // keep the shorter string on the left; the inner loop spins over s2
        if s1.len() > s2.len() {
            mem::swap(&mut s1, &mut s2);
        }
        let (len1, len2, start) = prefix_suffix_prep(&s1, &s2);
        if len1 == 0 {
            return len2 as i64;
        }
        self.ensure(len2);
        levenshtein_core(&s1, &s2, len1, len2, start, &mut self.base_char1_costs)
    }

    /// Compute the Levenshtein distance, or `-1` if it exceeds `max_distance`.
    pub fn distance_within(&mut self, string1: &str, string2: &str, max_distance: i64) -> i64 {
        let mut s1: FastVec<char> = string1.chars().collect();
        let mut s2: FastVec<char> = string2.chars().collect();
        if s1.is_empty() || s2.is_empty() {
            return null_distance_results(s1.len(), s2.len(), max_distance);
        }
        if max_distance <= 0 {
            return if s1 == s2 { 0 } else { -1 };
        }
        let max_distance = cmp::min(max_distance, i64::from(i32::MAX)) as usize;
        if s1.len() > s2.len() {
            mem::swap(&mut s1, &mut s2);
        }
        // the distance can never be less than the length difference
        if s2.len() - s1.len() > max_distance {
            return -1;
        }
        let (len1, len2, start) = prefix_suffix_prep(&s1, &s2);
        if len1 == 0 {
            return if len2 <= max_distance { len2 as i64 } else { -1 };
        }
        self.ensure(len2);
        if max_distance < len2 {
            levenshtein_banded(
                &s1,
                &s2,
                len1,
                len2,
                start,
                max_distance,
                &mut self.base_char1_costs,
            )
        } else {
            levenshtein_core(&s1, &s2, len1, len2, start, &mut self.base_char1_costs)
        }
    }

    /// Similarity in `0.0..=1.0` (`1 - distance / longer length`).
    pub fn similarity(&mut self, string1: &str, string2: &str) -> f64 {
        let len1 = string1.chars().count();
        let len2 = string2.chars().count();
        if len1 == 0 {
            return if len2 == 0 { 1.0 } else { 0.0 };
        }
        if len2 == 0 {
            return 0.0;
        }
        to_similarity(self.distance(string1, string2), cmp::max(len1, len2))
    }

    /// Similarity, or `-1.0` when it falls below `min_similarity`.
    pub fn similarity_within(
        &mut self,
        string1: &str,
        string2: &str,
        min_similarity: f64,
    ) -> Result<f64> {
        if !(0.0..=1.0).contains(&min_similarity) {
            return Err(SymSpellError::Argument(
                "min_similarity must be in 0.0..=1.0",
            ));
        }
        let len1 = string1.chars().count();
        let len2 = string2.chars().count();
        if len1 == 0 || len2 == 0 {
            return Ok(if len1 == 0 && len2 == 0 { 1.0 } else { 0.0 });
        }
        let longer = cmp::max(len1, len2);
        let max_distance = to_distance(min_similarity, longer);
        Ok(to_similarity(
            self.distance_within(string1, string2, max_distance),
            longer,
        ))
    }
}

impl Default for Levenshtein {
    fn default() -> Self {
        Self::new()
    }
}

/// Damerau-Levenshtein distance, optimal string alignment variant, with
/// reusable cost buffers.
///
/// Adjacent transpositions count as a single edit, but no substring is edited
/// twice, so `"ca"` to `"abc"` is distance 3 rather than the unrestricted
/// Damerau distance of 2. Not thread safe; give each thread its own instance.
pub struct DamerauOsa {
    base_char1_costs: Vec<i64>,
    base_prev_char1_costs: Vec<i64>,
}

impl DamerauOsa {
    pub fn new() -> Self {
        Self {
            base_char1_costs: Vec::new(),
            base_prev_char1_costs: Vec::new(),
        }
    }

    /// Create an instance pre-sized for strings up to `expected_max_length`
    /// characters.
    pub fn with_expected_max_length(expected_max_length: usize) -> Result<Self> {
        if expected_max_length == 0 {
            return Err(SymSpellError::Argument(
                "expected_max_length must be larger than 0",
            ));
        }
        Ok(Self {
            base_char1_costs: vec![0; expected_max_length],
            base_prev_char1_costs: vec![0; expected_max_length],
        })
    }

    fn ensure(&mut self, len2: usize) {
        if self.base_char1_costs.len() < len2 {
            self.base_char1_costs.resize(len2, 0);
            self.base_prev_char1_costs.resize(len2, 0);
        }
    }

    /// Compute the Damerau-OSA distance between two strings.
    pub fn distance(&mut self, string1: &str, string2: &str) -> i64 {
        let mut s1: FastVec<char> = string1.chars().collect();
        let mut s2: FastVec<char> = string2.chars().collect();
        if s1.is_empty() {
            return s2.len() as i64;
        }
        if s2.is_empty() {
            return s1.len() as i64;
        }
        if s1.len() > s2.len() {
            mem::swap(&mut s1, &mut s2);
        }
        let (len1, len2, start) = prefix_suffix_prep(&s1, &s2);
        if len1 == 0 {
            return len2 as i64;
        }
        self.ensure(len2);
        damerau_osa_core(
            &s1,
            &s2,
            len1,
            len2,
            start,
            &mut self.base_char1_costs,
            &mut self.base_prev_char1_costs,
        )
    }

    /// Compute the Damerau-OSA distance, or `-1` if it exceeds `max_distance`.
    pub fn distance_within(&mut self, string1: &str, string2: &str, max_distance: i64) -> i64 {
        let mut s1: FastVec<char> = string1.chars().collect();
        let mut s2: FastVec<char> = string2.chars().collect();
        if s1.is_empty() || s2.is_empty() {
            return null_distance_results(s1.len(), s2.len(), max_distance);
        }
        if max_distance <= 0 {
            return if s1 == s2 { 0 } else { -1 };
        }
        let max_distance = cmp::min(max_distance, i64::from(i32::MAX)) as usize;
        if s1.len() > s2.len() {
            mem::swap(&mut s1, &mut s2);
        }
        if s2.len() - s1.len() > max_distance {
            return -1;
        }
        let (len1, len2, start) = prefix_suffix_prep(&s1, &s2);
        if len1 == 0 {
            return if len2 <= max_distance { len2 as i64 } else { -1 };
        }
        self.ensure(len2);
        if max_distance < len2 {
            damerau_osa_banded(
                &s1,
                &s2,
                len1,
                len2,
                start,
                max_distance,
                &mut self.base_char1_costs,
                &mut self.base_prev_char1_costs,
            )
        } else {
            damerau_osa_core(
                &s1,
                &s2,
                len1,
                len2,
                start,
                &mut self.base_char1_costs,
                &mut self.base_prev_char1_costs,
            )
        }
    }

    /// Similarity in `0.0..=1.0` (`1 - distance / longer length`).
    pub fn similarity(&mut self, string1: &str, string2: &str) -> f64 {
        let len1 = string1.chars().count();
        let len2 = string2.chars().count();
        if len1 == 0 {
            return if len2 == 0 { 1.0 } else { 0.0 };
        }
        if len2 == 0 {
            return 0.0;
        }
        to_similarity(self.distance(string1, string2), cmp::max(len1, len2))
    }

    /// Similarity, or `-1.0` when it falls below `min_similarity`.
    pub fn similarity_within(
        &mut self,
        string1: &str,
        string2: &str,
        min_similarity: f64,
    ) -> Result<f64> {
        if !(0.0..=1.0).contains(&min_similarity) {
            return Err(SymSpellError::Argument(
                "min_similarity must be in 0.0..=1.0",
            ));
        }
        let len1 = string1.chars().count();
        let len2 = string2.chars().count();
        if len1 == 0 || len2 == 0 {
            return Ok(if len1 == 0 && len2 == 0 { 1.0 } else { 0.0 });
        }
        let longer = cmp::max(len1, len2);
        let max_distance = to_distance(min_similarity, longer);
        Ok(to_similarity(
            self.distance_within(string1, string2, max_distance),
            longer,
        ))
    }
}

impl Default for DamerauOsa {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatch wrapper selecting one of the edit distance kernels.
pub struct EditDistance {
    algorithm: DistanceAlgorithm,
    damerau_osa: DamerauOsa,
    levenshtein: Levenshtein,
}

impl EditDistance {
    pub fn new(algorithm: DistanceAlgorithm) -> Self {
        Self {
            algorithm,
            damerau_osa: DamerauOsa::new(),
            levenshtein: Levenshtein::new(),
        }
    }

    pub fn algorithm(&self) -> DistanceAlgorithm {
        self.algorithm
    }

    /// Distance between two strings with the selected algorithm.
    pub fn distance(&mut self, string1: &str, string2: &str) -> i64 {
        match self.algorithm {
            DistanceAlgorithm::Levenshtein => self.levenshtein.distance(string1, string2),
            DistanceAlgorithm::DamerauOsa => self.damerau_osa.distance(string1, string2),
        }
    }

    /// Distance between two strings with the selected algorithm, or `-1` if
    /// it exceeds `max_distance`.
    pub fn compare(&mut self, string1: &str, string2: &str, max_distance: i64) -> i64 {
        match self.algorithm {
            DistanceAlgorithm::Levenshtein => {
                self.levenshtein.distance_within(string1, string2, max_distance)
            }
            DistanceAlgorithm::DamerauOsa => {
                self.damerau_osa.distance_within(string1, string2, max_distance)
            }
        }
    }
}

fn levenshtein_core(
    s1: &[char],
    s2: &[char],
    len1: usize,
    len2: usize,
    start: usize,
    char1_costs: &mut [i64],
) -> i64 {
    for (j, cost) in char1_costs.iter_mut().enumerate().take(len2) {
        *cost = (j + 1) as i64;
    }
    let mut current_cost = 0;
    for i in 0..len1 {
        let char1 = s1[start + i];
        let mut left_char_cost = i as i64;
        let mut above_char_cost = i as i64;
        for j in 0..len2 {
            current_cost = left_char_cost; // cost on diagonal (substitution)
            left_char_cost = char1_costs[j];
            if s2[start + j] != char1 {
                // substitution if neither deletion nor insertion is cheaper
                if above_char_cost < current_cost {
                    current_cost = above_char_cost;
                }
                if left_char_cost < current_cost {
                    current_cost = left_char_cost;
                }
                current_cost += 1;
            }
            char1_costs[j] = current_cost;
            above_char_cost = current_cost;
        }
    }
    current_cost
}

fn levenshtein_banded(
    s1: &[char],
    s2: &[char],
    len1: usize,
    len2: usize,
    start: usize,
    max_distance: usize,
    char1_costs: &mut [i64],
) -> i64 {
    for j in 0..max_distance {
        char1_costs[j] = (j + 1) as i64;
    }
    for j in max_distance..len2 {
        char1_costs[j] = (max_distance + 1) as i64;
    }
    let len_diff = len2 - len1;
    let j_start_offset = max_distance - len_diff;
    let mut j_start = 0;
    let mut j_end = max_distance;
    let mut current_cost = 0;
    for i in 0..len1 {
        let char1 = s1[start + i];
        let mut prev_char1_cost = i as i64;
        let mut above_char_cost = i as i64;
        // only the window between the upper-left diagonal + maxDistance and
        // the lower-right diagonal - maxDistance can hold costs <= maxDistance
        if i > j_start_offset {
            j_start += 1;
        }
        if j_end < len2 {
            j_end += 1;
        }
        for j in j_start..j_end {
            current_cost = prev_char1_cost; // cost on diagonal (substitution)
            prev_char1_cost = char1_costs[j];
            if s2[start + j] != char1 {
                if above_char_cost < current_cost {
                    current_cost = above_char_cost;
                }
                if prev_char1_cost < current_cost {
                    current_cost = prev_char1_cost;
                }
                current_cost += 1;
            }
            char1_costs[j] = current_cost;
            above_char_cost = current_cost;
        }
        if char1_costs[i + len_diff] > max_distance as i64 {
            return -1;
        }
    }
    if current_cost <= max_distance as i64 {
        current_cost
    } else {
        -1
    }
}

fn damerau_osa_core(
    s1: &[char],
    s2: &[char],
    len1: usize,
    len2: usize,
    start: usize,
    char1_costs: &mut [i64],
    prev_char1_costs: &mut [i64],
) -> i64 {
    for (j, cost) in char1_costs.iter_mut().enumerate().take(len2) {
        *cost = (j + 1) as i64;
    }
    let mut char1 = char::MAX;
    let mut current_cost = 0;
    for i in 0..len1 {
        let prev_char1 = char1;
        char1 = s1[start + i];
        let mut char2 = char::MAX;
        let mut left_char_cost = i as i64;
        let mut above_char_cost = i as i64;
        let mut next_trans_cost = 0;
        for j in 0..len2 {
            let this_trans_cost = next_trans_cost;
            next_trans_cost = prev_char1_costs[j];
            current_cost = left_char_cost; // cost on diagonal (substitution)
            prev_char1_costs[j] = left_char_cost;
            left_char_cost = char1_costs[j];
            let prev_char2 = char2;
            char2 = s2[start + j];
            if char1 != char2 {
                if above_char_cost < current_cost {
                    current_cost = above_char_cost; // deletion
                }
                if left_char_cost < current_cost {
                    current_cost = left_char_cost; // insertion
                }
                current_cost += 1;
                if i != 0
                    && j != 0
                    && char1 == prev_char2
                    && prev_char1 == char2
                    && this_trans_cost + 1 < current_cost
                {
                    current_cost = this_trans_cost + 1; // transposition
                }
            }
            char1_costs[j] = current_cost;
            above_char_cost = current_cost;
        }
    }
    current_cost
}

#[allow(clippy::too_many_arguments)]
fn damerau_osa_banded(
    s1: &[char],
    s2: &[char],
    len1: usize,
    len2: usize,
    start: usize,
    max_distance: usize,
    char1_costs: &mut [i64],
    prev_char1_costs: &mut [i64],
) -> i64 {
    for j in 0..max_distance {
        char1_costs[j] = (j + 1) as i64;
    }
    for j in max_distance..len2 {
        char1_costs[j] = (max_distance + 1) as i64;
    }
    let len_diff = len2 - len1;
    let j_start_offset = max_distance - len_diff;
    let mut j_start = 0;
    let mut j_end = max_distance;
    let mut char1 = char::MAX;
    let mut current_cost = 0;
    for i in 0..len1 {
        let prev_char1 = char1;
        char1 = s1[start + i];
        let mut char2 = char::MAX;
        let mut left_char_cost = i as i64;
        let mut above_char_cost = i as i64;
        let mut next_trans_cost = 0;
        // only the window between the upper-left diagonal + maxDistance and
        // the lower-right diagonal - maxDistance can hold costs <= maxDistance
        if i > j_start_offset {
            j_start += 1;
        }
        if j_end < len2 {
            j_end += 1;
        }
        for j in j_start..j_end {
            let this_trans_cost = next_trans_cost;
            next_trans_cost = prev_char1_costs[j];
            current_cost = left_char_cost; // cost on diagonal (substitution)
            prev_char1_costs[j] = left_char_cost;
            left_char_cost = char1_costs[j];
            let prev_char2 = char2;
            char2 = s2[start + j];
            if char1 != char2 {
                if above_char_cost < current_cost {
                    current_cost = above_char_cost; // deletion
                }
                if left_char_cost < current_cost {
                    current_cost = left_char_cost; // insertion
                }
                current_cost += 1;
                if i != 0
                    && j != 0
                    && char1 == prev_char2
                    && prev_char1 == char2
                    && this_trans_cost + 1 < current_cost
                {
                    current_cost = this_trans_cost + 1; // transposition
                }
            }
            char1_costs[j] = current_cost;
            above_char_cost = current_cost;
        }
        if char1_costs[i + len_diff] > max_distance as i64 {
            return -1;
        }
    }
    if current_cost <= max_distance as i64 {
        current_cost
    } else {
        -1
    }
}
