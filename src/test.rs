#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use crate::symspell::{parse_words, transfer_case, unicode_normalization_form_kc};
    use crate::{
        to_similarity, ChunkArray, DamerauOsa, DistanceAlgorithm, EditDistance, Levenshtein,
        SuggestionStage, SymSpell, SymSpellError, Verbosity,
    };

    // Counts taken from the English frequency dictionary so that ranking
    // behaves like it does against the full dictionary.
    const ENGLISH_SAMPLE: &[(&str, i64)] = &[
        ("the", 23_135_851_162),
        ("of", 13_151_942_776),
        ("and", 12_997_637_966),
        ("to", 12_136_980_858),
        ("a", 9_081_174_698),
        ("in", 8_469_404_971),
        ("is", 4_705_743_816),
        ("you", 3_081_151_866),
        ("this", 2_885_734_811),
        ("can", 1_022_775_970),
        ("him", 742_702_206),
        ("where", 438_338_274),
        ("over", 299_464_599),
        ("love", 251_686_314),
        ("house", 231_310_420),
        ("take", 204_546_148),
        ("read", 145_174_628),
        ("brown", 76_077_336),
        ("quick", 49_768_339),
        ("dog", 49_747_138),
        ("inspired", 25_562_177),
        ("fox", 24_629_426),
        ("intermediate", 11_612_669),
        ("jumps", 11_605_272),
        ("lazy", 9_529_239),
        ("abolition", 1_796_362),
    ];

    fn english_sample() -> SymSpell {
        let mut symspell = SymSpell::default();
        for &(term, count) in ENGLISH_SAMPLE {
            symspell.create_dictionary_entry(term, count, None);
        }
        symspell
    }

    #[test]
    fn test_damerau_osa_distance() {
        let mut damerau = DamerauOsa::new();

        assert_eq!(0, damerau.distance("kitten", "kitten"));
        assert_eq!(6, damerau.distance("", "kitten"));
        assert_eq!(6, damerau.distance("kitten", ""));
        assert_eq!(3, damerau.distance("kitten", "sitting"));

        // adjacent transposition is a single edit
        assert_eq!(1, damerau.distance("ab", "ba"));
        assert_eq!(1, damerau.distance("abcdef", "abcdfe"));

        // optimal string alignment: no substring is edited twice, so this is
        // 3 rather than the unrestricted Damerau distance of 2
        assert_eq!(3, damerau.distance("ca", "abc"));

        // common prefix and suffix are trimmed before the DP
        assert_eq!(1, damerau.distance("prefixXsuffix", "prefixYsuffix"));
    }

    #[test]
    fn test_damerau_osa_distance_within() {
        let mut damerau = DamerauOsa::new();

        // -1 if and only if the true distance exceeds the bound
        assert_eq!(-1, damerau.distance_within("kitten", "sitting", 2));
        assert_eq!(3, damerau.distance_within("kitten", "sitting", 3));
        assert_eq!(3, damerau.distance_within("kitten", "sitting", 100));
        assert_eq!(-1, damerau.distance_within("ca", "abc", 2));
        assert_eq!(3, damerau.distance_within("ca", "abc", 3));

        // bound 0 degenerates into an equality check
        assert_eq!(0, damerau.distance_within("same", "same", 0));
        assert_eq!(-1, damerau.distance_within("same", "sane", 0));

        // empty strings against the bound
        assert_eq!(3, damerau.distance_within("", "abc", 3));
        assert_eq!(-1, damerau.distance_within("", "abc", 2));

        // length difference alone can exceed the bound
        assert_eq!(-1, damerau.distance_within("a", "abcdef", 2));
    }

    #[test]
    fn test_damerau_osa_symmetry() {
        let mut damerau = DamerauOsa::new();
        for (a, b) in [
            ("example", "samples"),
            ("sturgeon", "urgently"),
            ("levenshtein", "frankenstein"),
            ("distance", "difference"),
            ("ab", "ba"),
        ] {
            assert_eq!(damerau.distance(a, b), damerau.distance(b, a));
        }
    }

    #[test]
    fn test_levenshtein_distance() {
        let mut levenshtein = Levenshtein::new();

        assert_eq!(0, levenshtein.distance("kitten", "kitten"));
        assert_eq!(3, levenshtein.distance("kitten", "sitting"));

        // transpositions cost two edits without the Damerau extension
        assert_eq!(2, levenshtein.distance("ab", "ba"));

        assert_eq!(-1, levenshtein.distance_within("kitten", "sitting", 2));
        assert_eq!(3, levenshtein.distance_within("kitten", "sitting", 3));
        assert_eq!(-1, levenshtein.distance_within("flaw", "lawn", 1));
        assert_eq!(2, levenshtein.distance_within("flaw", "lawn", 2));
    }

    #[test]
    fn test_distance_unicode_chars() {
        let mut damerau = DamerauOsa::new();

        // distances are measured in chars, not bytes
        assert_eq!(1, damerau.distance("über", "uber"));
        assert_eq!(1, damerau.distance("部分居民", "部分居住"));
        assert_eq!(1, damerau.distance_within("naïve", "naive", 2));
    }

    #[test]
    fn test_similarity() {
        let mut damerau = DamerauOsa::new();

        assert_eq!(1.0, damerau.similarity("same", "same"));
        assert_eq!(0.75, damerau.similarity("abcd", "abcx"));
        assert_eq!(-1.0, to_similarity(-1, 10));

        let similar = damerau.similarity_within("abcd", "abcx", 0.5).unwrap();
        assert_eq!(0.75, similar);
        // below the required similarity
        let dissimilar = damerau.similarity_within("abcd", "wxyz", 0.5).unwrap();
        assert_eq!(-1.0, dissimilar);

        assert!(matches!(
            damerau.similarity_within("a", "b", 1.5),
            Err(SymSpellError::Argument(_))
        ));
        assert!(matches!(
            DamerauOsa::with_expected_max_length(0),
            Err(SymSpellError::Argument(_))
        ));
    }

    #[test]
    fn test_edit_distance_dispatch() {
        let mut osa = EditDistance::new(DistanceAlgorithm::DamerauOsa);
        let mut lev = EditDistance::new(DistanceAlgorithm::Levenshtein);

        assert_eq!(DistanceAlgorithm::DamerauOsa, osa.algorithm());
        assert_eq!(1, osa.compare("ab", "ba", 2));
        assert_eq!(2, lev.compare("ab", "ba", 2));
        assert_eq!(-1, lev.compare("ab", "ba", 1));
        assert_eq!(2, lev.distance("ab", "ba"));
    }

    #[test]
    fn test_chunk_array() {
        let mut array: ChunkArray<usize> = ChunkArray::new();
        // spans multiple chunks
        for i in 0..10_000 {
            assert_eq!(i, array.add(i));
        }
        assert_eq!(10_000, array.count());
        assert_eq!(&0, array.at(0));
        assert_eq!(&4_096, array.at(4_096));
        assert_eq!(&9_999, array.at(9_999));

        array.clear();
        assert_eq!(0, array.count());
        assert_eq!(0, array.add(42));
        assert_eq!(&42, array.at(0));

        let mut reserved: ChunkArray<u8> = ChunkArray::with_capacity(5_000);
        assert_eq!(0, reserved.count());
        reserved.add(7);
        assert_eq!(&7, reserved.at(0));
    }

    #[test]
    fn test_suggestion_stage() {
        let mut stage = SuggestionStage::new(16);
        stage.add(42, "abc");
        stage.add(42, "abcd");
        stage.add(7, "xyz");
        assert_eq!(2, stage.delete_count());
        assert_eq!(3, stage.node_count());

        let mut permanent = ahash::AHashMap::new();
        permanent.insert(42u32, vec![Box::from("existing")]);
        stage.commit_to(&mut permanent);

        let bucket = &permanent[&42];
        assert_eq!(3, bucket.len());
        for term in ["existing", "abc", "abcd"] {
            assert!(bucket.iter().any(|s| s.as_ref() == term));
        }
        assert_eq!(1, permanent[&7].len());

        stage.clear();
        assert_eq!(0, stage.delete_count());
        assert_eq!(0, stage.node_count());
    }

    #[test]
    fn test_staged_build_matches_direct_build() {
        let mut direct = SymSpell::default();
        let mut staged = SymSpell::default();
        let mut staging = SuggestionStage::new(64);
        for &(term, count) in ENGLISH_SAMPLE {
            direct.create_dictionary_entry(term, count, None);
            staged.create_dictionary_entry(term, count, Some(&mut staging));
        }
        staged.commit_staged(&mut staging);

        assert_eq!(direct.word_count(), staged.word_count());
        assert_eq!(direct.entry_count(), staged.entry_count());
        for input in ["tke", "hous", "abolution", "xyzzyx"] {
            let a = direct.lookup(input, Verbosity::All, 2, false).unwrap();
            let b = staged.lookup(input, Verbosity::All, 2, false).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_configuration_validation() {
        assert!(matches!(
            SymSpell::new(16, -1, 7, 1, 5),
            Err(SymSpellError::Config(_))
        ));
        assert!(matches!(
            SymSpell::new(16, 2, 1, 1, 5),
            Err(SymSpellError::Config(_))
        ));
        assert!(matches!(
            SymSpell::new(16, 2, 7, -1, 5),
            Err(SymSpellError::Config(_))
        ));
        assert!(matches!(
            SymSpell::new(16, 2, 7, 1, 17),
            Err(SymSpellError::Config(_))
        ));
        // prefix_length == max_dictionary_edit_distance is allowed
        assert!(SymSpell::new(16, 2, 2, 1, 5).is_ok());
    }

    #[test]
    fn test_string_hash_length_bits() {
        let symspell = SymSpell::default();
        // the hash is deterministic and keeps the term length in the low bits
        assert_eq!(
            symspell.get_string_hash("abc"),
            symspell.get_string_hash("abc")
        );
        assert_eq!(1, symspell.get_string_hash("a") & 0x3);
        assert_eq!(2, symspell.get_string_hash("ab") & 0x3);
        assert_eq!(3, symspell.get_string_hash("abc") & 0x3);
        assert_eq!(0, symspell.get_string_hash("") & 0x3);
    }

    #[test]
    fn test_create_dictionary_entry_threshold() {
        let mut symspell = SymSpell::new(16, 2, 7, 3, 5).unwrap();

        // accumulates below the threshold without becoming a correct word
        assert!(!symspell.create_dictionary_entry("word", 1, None));
        assert_eq!(0, symspell.word_count());
        assert!(!symspell.create_dictionary_entry("word", 1, None));
        assert_eq!(0, symspell.word_count());
        assert!(symspell
            .lookup("word", Verbosity::Top, 2, false)
            .unwrap()
            .is_empty());

        // crossing the threshold promotes the word and builds its deletes
        assert!(symspell.create_dictionary_entry("word", 1, None));
        assert_eq!(1, symspell.word_count());
        let results = symspell.lookup("word", Verbosity::Top, 2, false).unwrap();
        assert_eq!(3, results[0].count);
        let results = symspell.lookup("wrd", Verbosity::Top, 2, false).unwrap();
        assert_eq!("word", results[0].term);

        // once promoted, further occurrences only update the count
        assert!(!symspell.create_dictionary_entry("word", 2, None));
        let results = symspell.lookup("word", Verbosity::Top, 2, false).unwrap();
        assert_eq!(5, results[0].count);

        // rejected outright
        assert!(!symspell.create_dictionary_entry("zero", 0, None));
        assert!(!symspell.create_dictionary_entry("negative", -5, None));
    }

    #[test]
    fn test_count_saturation() {
        let mut symspell = SymSpell::default();
        symspell.create_dictionary_entry("big", i64::MAX, None);
        symspell.create_dictionary_entry("big", 100, None);
        let results = symspell.lookup("big", Verbosity::Top, 0, false).unwrap();
        assert_eq!(i64::MAX, results[0].count);
    }

    #[test]
    fn test_entry_idempotence() {
        let mut twice = SymSpell::default();
        twice.create_dictionary_entry("hello", 50, None);
        twice.create_dictionary_entry("hello", 50, None);
        let mut once = SymSpell::default();
        once.create_dictionary_entry("hello", 100, None);

        let a = twice.lookup("hello", Verbosity::Top, 0, false).unwrap();
        let b = once.lookup("hello", Verbosity::Top, 0, false).unwrap();
        assert_eq!(a, b);
        assert_eq!(100, a[0].count);
    }

    #[test]
    fn test_purge_below_threshold_words() {
        let mut symspell = SymSpell::new(16, 2, 7, 10, 5).unwrap();
        symspell.create_dictionary_entry("rare", 2, None);
        symspell.purge_below_threshold_words();
        // the accumulated count was dropped, so the word starts from scratch
        symspell.create_dictionary_entry("rare", 9, None);
        assert_eq!(0, symspell.word_count());
        symspell.create_dictionary_entry("rare", 1, None);
        assert_eq!(1, symspell.word_count());
    }

    #[test]
    fn test_lookup() {
        let symspell = english_sample();

        let results = symspell.lookup("tke", Verbosity::Closest, 2, false).unwrap();
        assert_eq!("the", results[0].term);
        assert_eq!(1, results[0].distance);

        let results = symspell
            .lookup("abolution", Verbosity::Closest, 2, false)
            .unwrap();
        assert_eq!("abolition", results[0].term);
        assert_eq!(1, results[0].distance);

        let results = symspell
            .lookup("intermedaite", Verbosity::Closest, 2, false)
            .unwrap();
        assert_eq!("intermediate", results[0].term);
        assert_eq!(1, results[0].distance);

        let results = symspell.lookup("hous", Verbosity::Top, 2, false).unwrap();
        assert_eq!(1, results.len());
        assert_eq!("house", results[0].term);
        assert_eq!(1, results[0].distance);
        assert_eq!(231_310_420, results[0].count);
    }

    #[test]
    fn test_lookup_exact_match_first() {
        let symspell = english_sample();
        for verbosity in [Verbosity::Top, Verbosity::Closest, Verbosity::All] {
            let results = symspell.lookup("the", verbosity, 2, false).unwrap();
            assert_eq!("the", results[0].term);
            assert_eq!(0, results[0].distance);
        }
    }

    #[test]
    fn test_lookup_verbosity_shapes() {
        let symspell = english_sample();

        let top = symspell.lookup("tke", Verbosity::Top, 2, false).unwrap();
        assert_eq!(1, top.len());
        assert_eq!("the", top[0].term);

        let closest = symspell.lookup("tke", Verbosity::Closest, 2, false).unwrap();
        assert!(closest.len() > 1);
        assert!(closest.iter().all(|s| s.distance == closest[0].distance));

        let all = symspell.lookup("tke", Verbosity::All, 2, false).unwrap();
        assert!(all.len() >= closest.len());
        // sorted by distance ascending, then count descending, no duplicates
        for pair in all.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
            if pair[0].distance == pair[1].distance {
                assert!(pair[0].count >= pair[1].count);
            }
            assert!(pair[0].term != pair[1].term);
        }
    }

    #[test]
    fn test_lookup_max_edit_distance_zero() {
        let symspell = english_sample();
        let results = symspell.lookup("the", Verbosity::Top, 0, false).unwrap();
        assert_eq!(1, results.len());
        let results = symspell.lookup("teh", Verbosity::Top, 0, false).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_lookup_include_unknown() {
        let symspell = english_sample();

        let results = symspell.lookup("xyzzyx", Verbosity::Top, 2, false).unwrap();
        assert!(results.is_empty());

        let results = symspell.lookup("xyzzyx", Verbosity::Top, 2, true).unwrap();
        assert_eq!(1, results.len());
        assert_eq!("xyzzyx", results[0].term);
        assert_eq!(3, results[0].distance);
        assert_eq!(0, results[0].count);
    }

    #[test]
    fn test_lookup_input_longer_than_dictionary() {
        let symspell = english_sample();
        // longest dictionary word is 12 chars, so nothing can be in range
        let results = symspell
            .lookup("pneumonoultramicroscopic", Verbosity::All, 2, false)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_lookup_rejects_out_of_range_distance() {
        let symspell = english_sample();
        assert!(matches!(
            symspell.lookup("the", Verbosity::Top, 3, false),
            Err(SymSpellError::Argument(_))
        ));
        assert!(matches!(
            symspell.lookup("the", Verbosity::Top, -1, false),
            Err(SymSpellError::Argument(_))
        ));
    }

    #[test]
    fn test_lookup_short_input() {
        let mut symspell = SymSpell::default();
        symspell.create_dictionary_entry("ab", 100, None);
        symspell.create_dictionary_entry("cd", 50, None);
        // reachable only through the empty delete: distance max(len1, len2)
        let results = symspell.lookup("xy", Verbosity::All, 2, false).unwrap();
        assert_eq!(2, results.len());
        assert!(results.iter().all(|s| s.distance == 2));
    }

    #[test]
    fn test_lookup_compound() {
        let mut symspell = english_sample();
        symspell.load_bigram_dictionary_line("where is 10406923", 0, 2, " ");
        symspell.load_bigram_dictionary_line("is the 676417907", 0, 2, " ");
        symspell.load_bigram_dictionary_line("the love 3837413", 0, 2, " ");

        let results = symspell.lookup_compound("whereis th elove", 2).unwrap();
        assert_eq!(1, results.len());
        assert_eq!("where is the love", results[0].term);
        assert_eq!(2, results[0].distance);

        let results = symspell.lookup_compound("can yu readthis", 2).unwrap();
        assert_eq!("can you read this", results[0].term);
        assert_eq!(2, results[0].distance);
    }

    #[test]
    fn test_lookup_compound_merge() {
        let symspell = english_sample();
        // "ins pired" merges into "inspired": one removed space, no other edits
        let results = symspell.lookup_compound("ins pired him", 2).unwrap();
        assert_eq!("inspired him", results[0].term);
        assert_eq!(1, results[0].distance);
    }

    #[test]
    fn test_lookup_compound_correct_sentence_unchanged() {
        let symspell = english_sample();
        let results = symspell
            .lookup_compound("the quick brown fox jumps over the lazy dog", 2)
            .unwrap();
        assert_eq!(
            "the quick brown fox jumps over the lazy dog",
            results[0].term
        );
        assert_eq!(0, results[0].distance);
    }

    #[test]
    fn test_word_segmentation() {
        let symspell = english_sample();

        let result = symspell
            .word_segmentation("thequickbrownfoxjumpsoverthelazydog", 0)
            .unwrap();
        assert_eq!(
            "the quick brown fox jumps over the lazy dog",
            result.corrected_string
        );
        assert_eq!(result.segmented_string, result.corrected_string);
        // eight inserted spaces, no spelling corrections
        assert_eq!(8, result.distance_sum);
    }

    #[test]
    fn test_word_segmentation_with_correction() {
        let symspell = english_sample();

        let result = symspell.word_segmentation("thequikbrownfox", 1).unwrap();
        assert_eq!("the quik brown fox", result.segmented_string);
        assert_eq!("the quick brown fox", result.corrected_string);
        // three inserted spaces plus one correction
        assert_eq!(4, result.distance_sum);
    }

    #[test]
    fn test_word_segmentation_existing_spaces() {
        let symspell = english_sample();

        let result = symspell.word_segmentation("the quickbrown fox", 0).unwrap();
        assert_eq!("the quick brown fox", result.corrected_string);
        assert_eq!(1, result.distance_sum);
    }

    #[test]
    fn test_word_segmentation_preserves_case() {
        let symspell = english_sample();

        let result = symspell.word_segmentation("Thequickbrownfox", 0).unwrap();
        assert_eq!("The quick brown fox", result.corrected_string);

        // case is transferred onto corrected words too: THF -> THE
        let result = symspell.word_segmentation("THFQUICKBROWNFOX", 1).unwrap();
        assert_eq!("THE QUICK BROWN FOX", result.corrected_string);
    }

    #[test]
    fn test_word_segmentation_cjk() {
        let mut symspell = SymSpell::default();
        for (term, count) in [
            ("部分", 23_487),
            ("居民", 18_080),
            ("生活", 63_509),
            ("水平", 18_632),
        ] {
            symspell.create_dictionary_entry(term, count, None);
        }
        let result = symspell.word_segmentation("部分居民生活水平", 0).unwrap();
        assert_eq!("部分 居民 生活 水平", result.corrected_string);
    }

    #[test]
    fn test_word_segmentation_empty_input() {
        let symspell = english_sample();
        let result = symspell.word_segmentation("", 0).unwrap();
        assert_eq!("", result.corrected_string);
        assert_eq!(0, result.distance_sum);
    }

    #[test]
    fn test_load_dictionary_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "the 23135851162").unwrap();
        writeln!(file, "of 13151942776").unwrap();
        writeln!(file, "junk").unwrap();
        writeln!(file, "bad notanumber").unwrap();
        writeln!(file, "the 1").unwrap();
        file.flush().unwrap();

        let mut symspell = SymSpell::default();
        assert!(symspell.load_dictionary(file.path(), 0, 1, " "));
        assert_eq!(2, symspell.word_count());
        // duplicate terms accumulate
        let results = symspell.lookup("the", Verbosity::Top, 0, false).unwrap();
        assert_eq!(23_135_851_163, results[0].count);

        assert!(!symspell.load_dictionary(Path::new("no/such/file.txt"), 0, 1, " "));
    }

    #[test]
    fn test_load_bigram_dictionary_line() {
        let mut symspell = SymSpell::default();
        // with a space separator the term spans two columns
        assert!(symspell.load_bigram_dictionary_line("where is 10406923", 0, 2, " "));
        assert_eq!(Some(10_406_923), symspell.bigram_count("where is"));
        // tab separated bigrams keep the term in one column
        assert!(symspell.load_bigram_dictionary_line("where is\t10406923", 0, 1, "\t"));
        // malformed lines are skipped
        assert!(!symspell.load_bigram_dictionary_line("where is", 0, 2, " "));
        assert!(!symspell.load_bigram_dictionary_line("where is often", 0, 2, " "));
    }

    #[test]
    fn test_create_dictionary_from_corpus() {
        let corpus = "The quick brown fox. The lazy dog!";
        let mut symspell = SymSpell::default();
        symspell.create_dictionary_stream(corpus.as_bytes()).unwrap();

        assert_eq!(6, symspell.word_count());
        let results = symspell.lookup("the", Verbosity::Top, 0, false).unwrap();
        assert_eq!(2, results[0].count);
        assert_eq!(5, symspell.max_length());
    }

    #[test]
    fn test_parse_words() {
        assert_eq!(
            vec!["the", "quick", "brown", "fox"],
            parse_words("The quick, brown fox!")
        );
        assert_eq!(vec!["couldn't", "read"], parse_words("couldn't read"));
        assert_eq!(vec!["don’t"], parse_words("don’t"));
        assert!(parse_words("...!?").is_empty());
    }

    #[test]
    fn test_normalization() {
        assert_eq!("scientific", unicode_normalization_form_kc("scientiﬁc"));
    }

    #[test]
    fn test_transfer_case() {
        assert_eq!("The", transfer_case("Thf", "the"));
        assert_eq!("THE", transfer_case("THF", "the"));
        // a longer target keeps its tail unchanged
        assert_eq!("Houses", transfer_case("Hous", "houses"));
        // transfer works with multi-byte characters
        assert_eq!("ŁĄKĘ", transfer_case("LAKE", "łąkę"));
    }

    #[test]
    fn test_accessors() {
        let symspell = english_sample();
        assert_eq!(2, symspell.max_dictionary_edit_distance());
        assert_eq!(7, symspell.prefix_length());
        assert_eq!(1, symspell.count_threshold());
        assert_eq!(12, symspell.max_length());
        assert_eq!(ENGLISH_SAMPLE.len(), symspell.word_count());
        assert!(symspell.entry_count() > symspell.word_count());
    }
}
