//! Random-input fuzzer for transform attribute parsing
//!
//! Feeds arbitrary bytes to the parser as a list of attributes. Anything that
//! parses must regenerate to exactly the bytes it was parsed from.

#![no_main]

use ike_proto::{Parser, TransformAttribute, generator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut parser = Parser::new(data);

    while !parser.is_empty() {
        let start = parser.offset();
        let Ok(attribute) = parser.parse_payload::<TransformAttribute>() else {
            // INVARIANT: a failed parse consumes nothing
            assert_eq!(parser.offset(), start);
            break;
        };

        let wire = generator::to_bytes(&attribute).expect("parsed attribute must encode");
        assert_eq!(&wire[..], &data[start..parser.offset()], "re-encoding must be byte-identical");
        assert_eq!(wire.len(), attribute.length());
    }
});
