#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (String, usize)| {
    let (query, index) = input;
    // Removal must never panic, even for out-of-range or operator indexes.
    // Starting from a normalized sequence, it must also leave one behind.
    let toks = neuroq::query::normalize(neuroq::query::tokens(&query));
    let repaired = neuroq::query::remove_term_at(toks, index);
    assert_eq!(repaired, neuroq::query::normalize(repaired.clone()));
});
