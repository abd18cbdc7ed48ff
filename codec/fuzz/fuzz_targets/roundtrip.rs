#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use podwire_codec::{Endian, Pod, Reader, Writer, U256};

#[derive(Arbitrary, Debug)]
enum Value {
    Boolean(bool),
    Uint8(u8),
    Uint16(u16, bool),
    Uint32(u32, bool),
    Uint64(u64, bool),
    Uint128(u128, bool),
    Uint256([u8; 32], bool),
    Bytes(Vec<u8>),
    VarintU32(u32),
    VarintU64(u64),
    VarintU128(u128),
    VarintVec(Vec<u64>),
    Pod([u8; 32]),
    PodVec(Vec<[u8; 4]>),
    PodVecVec(Vec<Vec<[u8; 4]>>),
}

fn endian(big: bool) -> Endian {
    if big {
        Endian::Big
    } else {
        Endian::Little
    }
}

fn write(writer: &mut Writer, value: &Value) {
    match value {
        Value::Boolean(v) => writer.boolean(*v),
        Value::Uint8(v) => writer.uint8(*v),
        Value::Uint16(v, big) => writer.uint16(*v, endian(*big)),
        Value::Uint32(v, big) => writer.uint32(*v, endian(*big)),
        Value::Uint64(v, big) => writer.uint64(*v, endian(*big)),
        Value::Uint128(v, big) => writer.uint128(*v, endian(*big)),
        Value::Uint256(v, big) => writer.uint256(U256::from_le_bytes(*v), endian(*big)),
        Value::Bytes(v) => {
            writer.varint(v.len() as u64).unwrap();
            writer.bytes(v);
        }
        Value::VarintU32(v) => writer.varint(*v).unwrap(),
        Value::VarintU64(v) => writer.varint(*v).unwrap(),
        Value::VarintU128(v) => writer.varint(*v).unwrap(),
        Value::VarintVec(v) => writer.varint_vec(v).unwrap(),
        Value::Pod(v) => writer.pod(&Pod::new(*v)).unwrap(),
        Value::PodVec(v) => {
            let pods: Vec<Pod<4>> = v.iter().copied().map(Pod::new).collect();
            writer.pod_vec(&pods).unwrap();
        }
        Value::PodVecVec(v) => {
            let pods: Vec<Vec<Pod<4>>> = v
                .iter()
                .map(|inner| inner.iter().copied().map(Pod::new).collect())
                .collect();
            writer.pod_vec_vec(&pods).unwrap();
        }
    }
}

fn check(reader: &mut Reader, value: &Value) {
    match value {
        Value::Boolean(v) => assert_eq!(reader.boolean(false).unwrap(), *v),
        Value::Uint8(v) => assert_eq!(reader.uint8(false).unwrap(), *v),
        Value::Uint16(v, big) => assert_eq!(reader.uint16(false, endian(*big)).unwrap(), *v),
        Value::Uint32(v, big) => assert_eq!(reader.uint32(false, endian(*big)).unwrap(), *v),
        Value::Uint64(v, big) => assert_eq!(reader.uint64(false, endian(*big)).unwrap(), *v),
        Value::Uint128(v, big) => assert_eq!(reader.uint128(false, endian(*big)).unwrap(), *v),
        Value::Uint256(v, big) => assert_eq!(
            reader.uint256(false, endian(*big)).unwrap(),
            U256::from_le_bytes(*v)
        ),
        Value::Bytes(v) => {
            let len = reader.varint::<u64>(false).unwrap() as usize;
            assert_eq!(&reader.bytes(len, false).unwrap()[..], &v[..]);
        }
        Value::VarintU32(v) => assert_eq!(reader.varint::<u32>(false).unwrap(), *v),
        Value::VarintU64(v) => assert_eq!(reader.varint::<u64>(false).unwrap(), *v),
        Value::VarintU128(v) => assert_eq!(reader.varint::<u128>(false).unwrap(), *v),
        Value::VarintVec(v) => assert_eq!(&reader.varint_vec::<u64>(false).unwrap(), v),
        Value::Pod(v) => assert_eq!(reader.pod::<Pod>(false).unwrap(), Pod::new(*v)),
        Value::PodVec(v) => {
            let pods = reader.pod_vec::<Pod<4>>(false).unwrap();
            assert_eq!(pods.len(), v.len());
            for (pod, bytes) in pods.iter().zip(v) {
                assert_eq!(pod.as_slice(), &bytes[..]);
            }
        }
        Value::PodVecVec(v) => {
            let pods = reader.pod_vec_vec::<Pod<4>>(false).unwrap();
            assert_eq!(pods.len(), v.len());
            for (decoded, expected) in pods.iter().zip(v) {
                assert_eq!(decoded.len(), expected.len());
                for (pod, bytes) in decoded.iter().zip(expected) {
                    assert_eq!(pod.as_slice(), &bytes[..]);
                }
            }
        }
    }
}

fuzz_target!(|values: Vec<Value>| {
    let mut writer = Writer::new();
    for value in &values {
        write(&mut writer, value);
    }

    // Peeking the first value must not move the cursor.
    let mut reader = Reader::from(&writer);
    if !values.is_empty() {
        let _ = reader.pod::<Pod<1>>(true);
        let _ = reader.varint_vec::<u64>(true);
        assert_eq!(reader.position(), 0);
    }

    for value in &values {
        check(&mut reader, value);
    }
    assert!(reader.is_exhausted());

    // Arbitrary input may fail to decode but must never panic.
    let mut reader = Reader::from(writer.data());
    let _ = reader.pod_vec_vec::<Pod<4>>(false);
    let _ = reader.varint_vec::<u128>(true);
});
