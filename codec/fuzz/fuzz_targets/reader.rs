#![no_main]

use libfuzzer_sys::fuzz_target;
use podwire_codec::{Endian, Pod, Reader, Serializable, SerializableVector, U256};

fuzz_target!(|data: &[u8]| {
    let mut reader = Reader::from(data).with_items(..=1024);
    loop {
        let start = reader.position();
        let progressed = match data.get(start).copied().unwrap_or(0) % 6 {
            0 => reader.varint::<U256>(false).is_ok(),
            1 => reader.uint64(false, Endian::Big).is_ok(),
            2 => reader.pod_vec::<Pod<3>>(false).is_ok(),
            3 => reader.pod_vec_vec::<Pod<2>>(false).is_ok(),
            4 => reader.varint_vec::<u16>(false).is_ok(),
            _ => reader.hex(5, false).is_ok(),
        };
        if !progressed {
            // Failed reads never move the cursor.
            assert_eq!(reader.position(), start);
            break;
        }
        assert!(reader.position() <= reader.size());
        if reader.position() == start {
            break;
        }
    }

    if let Ok(vector) = SerializableVector::<Pod<2>>::from_bytes(data) {
        assert_eq!(vector.to_bytes().unwrap().len(), vector.size());
    }
});
