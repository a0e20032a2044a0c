#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Tokenize, classify, normalize, and rejoin arbitrary strings.
    // This should not panic, and normalize must be idempotent.
    let toks = neuroq::query::tokens(data);
    let once = neuroq::query::normalize(toks);
    let twice = neuroq::query::normalize(once.clone());
    assert_eq!(once, twice);
    let _ = neuroq::query::join_tokens(&once);
});
