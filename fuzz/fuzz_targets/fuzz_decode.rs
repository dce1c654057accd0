#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::{BmpPermissiveness, DecodeRequest, ImageInfo};

fuzz_target!(|data: &[u8]| {
    // Probe and decode at every permissiveness level; must never panic
    let _ = ImageInfo::from_bytes(data);
    for p in [
        BmpPermissiveness::Strict,
        BmpPermissiveness::Standard,
        BmpPermissiveness::Permissive,
    ] {
        let _ = DecodeRequest::new(data)
            .with_permissiveness(p)
            .decode(enough::Unstoppable);
    }
});
