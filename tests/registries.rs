//! Integration tests for the built-in architecture registries.
//!
//! These exercise the public facade only: every registry is checked for word sizing, override
//! correctness against the base tables, exact lookup error texts, and scalar encoding at the
//! boundaries of every integer type it binds.

use bintypes::{
    base_table, default_registry, lookup, registries, registry, Architecture, ByteOrder, Error,
    RegistryId, ScalarType, TypeName, TypeRegistry, Value,
};
use strum::IntoEnumIterator;

const BE: ByteOrder = ByteOrder::BigEndian;
const LE: ByteOrder = ByteOrder::LittleEndian;

fn get(architecture: Architecture, order: ByteOrder) -> &'static TypeRegistry {
    registry(architecture, order).unwrap()
}

#[test]
fn pointer_is_address_size() {
    for registry in registries() {
        let pointer = lookup(registry, "pointer").unwrap();
        assert_eq!(
            pointer.width(),
            registry.address_size(),
            "{}",
            RegistryId::from(registry)
        );
    }
}

#[test]
fn word_sized_names() {
    let expected = [
        (Architecture::Arm, 4),
        (Architecture::Arm64, 8),
        (Architecture::Mips, 4),
        (Architecture::Mips64, 8),
        (Architecture::X86, 4),
        (Architecture::X86_64, 8),
        (Architecture::Ppc, 4),
        (Architecture::Ppc64, 8),
    ];

    for (architecture, width) in expected {
        for order in ByteOrder::iter().filter(|order| architecture.supports(*order)) {
            let registry = get(architecture, order);
            assert_eq!(registry.address_size(), width);
            for name in ["long", "ulong", "machine_word", "pointer"] {
                let scalar = registry.lookup(name).unwrap();
                assert_eq!(scalar.width(), width, "{architecture} {name}");
                assert_eq!(scalar.order(), order);
            }
            let long_min = if width == 4 {
                i128::from(i32::MIN)
            } else {
                i128::from(i64::MIN)
            };
            assert_eq!(registry.lookup("long").unwrap().min_value(), Some(long_min));
        }
    }
}

#[test]
fn override_correctness() {
    assert_eq!(
        get(Architecture::Arm, BE).lookup("long"),
        Ok(base_table(BE).get(TypeName::Int32).unwrap())
    );
    assert_eq!(
        get(Architecture::Arm64, BE).lookup("long"),
        Ok(base_table(BE).get(TypeName::Int64).unwrap())
    );
    assert_eq!(
        get(Architecture::Mips, LE).lookup("ulong"),
        Ok(base_table(LE).get(TypeName::UInt32).unwrap())
    );
    assert_eq!(
        get(Architecture::Mips64, LE).lookup("ulong"),
        Ok(base_table(LE).get(TypeName::UInt64).unwrap())
    );
}

#[test]
fn unknown_name_text() {
    let cases = [
        (Architecture::Arm, BE, "unknown ARM (big-endian) type: foo"),
        (Architecture::Arm64, BE, "unknown ARM64 (big-endian) type: foo"),
        (Architecture::Mips, LE, "unknown MIPS (little-endian) type: foo"),
        (Architecture::Mips64, LE, "unknown MIPS64 (little-endian) type: foo"),
        (Architecture::X86_64, LE, "unknown X86_64 (little-endian) type: foo"),
        (Architecture::Ppc, BE, "unknown PPC (big-endian) type: foo"),
    ];

    for (architecture, order, message) in cases {
        let err = lookup(get(architecture, order), "foo").unwrap_err();
        assert_eq!(err.to_string(), message);
    }
}

#[test]
fn endianness() {
    let value = Value::from(0x0102_0304u32);

    let big = get(Architecture::Arm, BE).lookup("uint32").unwrap();
    assert_eq!(big.pack(&value).unwrap(), [0x01, 0x02, 0x03, 0x04]);

    let little = get(Architecture::Arm, LE).lookup("uint32").unwrap();
    assert_eq!(little.pack(&value).unwrap(), [0x04, 0x03, 0x02, 0x01]);

    assert_eq!(big.unpack(&[0x04, 0x03, 0x02, 0x01]).unwrap(), Value::Int(0x0403_0201));
}

#[test]
fn integer_boundaries() {
    for registry in registries() {
        for (name, scalar) in registry.table().iter() {
            let (Some(min), Some(max)) = (scalar.min_value(), scalar.max_value()) else {
                continue;
            };

            for edge in [min, max] {
                let bytes = scalar.pack(&Value::Int(edge)).unwrap();
                assert_eq!(bytes.len(), scalar.width());
                assert_eq!(scalar.unpack(&bytes).unwrap(), Value::Int(edge), "{name}");
            }

            for outside in [min - 1, max + 1] {
                assert!(
                    matches!(
                        scalar.pack(&Value::Int(outside)),
                        Err(Error::ValueOutOfRange { .. })
                    ),
                    "{name} accepted {outside}"
                );
            }
        }
    }
}

#[test]
fn scalar_round_trips() {
    let samples: [i128; 8] = [0, 1, -1, 0x7f, 0x80, 0x1234, -0x8000, 0x0102_0304_0506_0708];

    for registry in registries() {
        for (name, scalar) in registry.table().iter() {
            match (scalar.min_value(), scalar.max_value()) {
                (Some(min), Some(max)) => {
                    for sample in samples.into_iter().filter(|v| (min..=max).contains(v)) {
                        let bytes = scalar.pack(&Value::Int(sample)).unwrap();
                        assert_eq!(scalar.unpack(&bytes).unwrap(), Value::Int(sample), "{name}");
                    }
                }
                _ => {
                    for sample in [0.0, -1.5, 0.15625, f64::from(f32::MAX), f64::INFINITY] {
                        let bytes = scalar.pack(&Value::Float(sample)).unwrap();
                        assert_eq!(scalar.unpack(&bytes).unwrap(), Value::Float(sample));
                    }
                }
            }
        }
    }
}

#[test]
fn lookup_never_coerces() {
    let arm = default_registry(Architecture::Arm);
    for name in ["Int32", "u32", "uint32_t", "unsigned long", "ptr", "", "pointer\0"] {
        assert!(
            matches!(arm.lookup(name), Err(Error::TypeNotFound { .. })),
            "{name:?} resolved"
        );
    }
}

#[test]
fn every_name_resolves_everywhere() {
    for registry in registries() {
        for name in TypeName::iter() {
            let scalar: ScalarType = registry.resolve(name).unwrap();
            assert_eq!(registry.lookup(name.as_str()), Ok(scalar));
        }
    }
}

#[test]
fn registry_ids_round_trip() {
    for registry in registries() {
        let id = RegistryId::from(registry);
        let text = format!("{}:{}", id.architecture, id.order);
        let parsed: RegistryId = text.parse().unwrap();
        assert!(std::ptr::eq(parsed.registry().unwrap(), registry));
    }

    let id: RegistryId = "aarch64".parse().unwrap();
    assert_eq!(id.registry().unwrap().address_size(), 8);
    assert!("sparc:be".parse::<RegistryId>().is_err());
}
