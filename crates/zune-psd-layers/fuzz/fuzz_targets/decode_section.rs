#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // feed the buffer straight in as a layer and mask section,
    // skipping the file header
    use zune_psd_layers::zune_core::bytestream::ZCursor;
    let data = ZCursor::new(data);

    let mut decoder = zune_psd_layers::PsdLayerDecoder::new(data);
    let _ = decoder.decode_layer_and_mask_info();
});
