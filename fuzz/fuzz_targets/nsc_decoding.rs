#![no_main]

use ironrdp_nsc_fuzzing::generators::NscInput;
use ironrdp_nsc_fuzzing::oracles;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: NscInput<'_>| {
    oracles::nsc_decode(input);
});
