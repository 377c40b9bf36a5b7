#![no_main]

use ironrdp_nsc_fuzzing::generators::RleInput;
use ironrdp_nsc_fuzzing::oracles;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: RleInput<'_>| {
    oracles::nsc_rle_decompress(input);
});
