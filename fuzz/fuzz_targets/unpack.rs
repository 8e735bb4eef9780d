#![no_main]

use bintypes::{registries, TypeName, TypeReader};
use libfuzzer_sys::fuzz_target;
use strum::IntoEnumIterator;

fuzz_target!(|data: &[u8]| {
    for registry in registries() {
        let mut reader = TypeReader::new(data, registry);
        for name in TypeName::iter() {
            if reader.read_name(name).is_err() {
                break;
            }
        }
    }
});
