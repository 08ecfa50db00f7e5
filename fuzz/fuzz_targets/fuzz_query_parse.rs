#![no_main]

use arbitrary::Arbitrary;
use hookwire_query::{parse, serialize, try_parse};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct QueryInput {
    raw: String,
    strict: bool,
}

fuzz_target!(|input: QueryInput| {
    if input.strict {
        if let Ok(state) = try_parse(&input.raw) {
            // Anything accepted strictly must survive its own serialization.
            let text = serialize(&state);
            let back = try_parse(&text).expect("serialized state must parse");
            assert_eq!(serialize(&back), text);
        }
    } else {
        let state = parse(&input.raw);
        let _ = serialize(&state);
    }
});
