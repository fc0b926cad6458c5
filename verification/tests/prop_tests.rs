use proptest::prelude::*;

use credo_verification::{FieldElement, Proof, SCALAR_FIELD_MODULUS};

fn arb_element() -> impl Strategy<Value = FieldElement> {
    any::<[u8; 32]>().prop_map(FieldElement::from_be_bytes)
}

proptest! {
    /// Decimal and hex spellings of the same integer parse identically.
    #[test]
    fn decimal_and_hex_agree(n in any::<u128>()) {
        let dec: FieldElement = n.to_string().parse().unwrap();
        let hex: FieldElement = format!("0x{n:x}").parse().unwrap();
        prop_assert_eq!(dec, hex);
        prop_assert_eq!(dec.to_limbs()[0], n as u64);
        prop_assert_eq!(dec.to_limbs()[1], (n >> 64) as u64);
    }

    /// Display output always parses back to the same element.
    #[test]
    fn display_parses_back(e in arb_element()) {
        let parsed: FieldElement = e.to_string().parse().unwrap();
        prop_assert_eq!(parsed, e);
    }

    /// Byte order and numeric order coincide.
    #[test]
    fn ordering_is_numeric(a in any::<u128>(), b in any::<u128>()) {
        prop_assert_eq!(
            FieldElement::from_limbs([a as u64, (a >> 64) as u64, 0, 0])
                .cmp(&FieldElement::from_limbs([b as u64, (b >> 64) as u64, 0, 0])),
            a.cmp(&b)
        );
    }

    /// Every value whose top limb exceeds r's is outside the scalar field.
    #[test]
    fn large_values_are_not_scalars(low in any::<[u64; 3]>(), extra in 1u64..1_000) {
        let top = SCALAR_FIELD_MODULUS.to_limbs()[3] + extra;
        let e = FieldElement::from_limbs([low[0], low[1], low[2], top]);
        prop_assert!(!e.is_scalar());
    }

    /// Calldata encoding is a bijection on proofs.
    #[test]
    fn calldata_layout_is_lossless(coords in prop::collection::vec(arb_element(), 8)) {
        let a = [coords[0], coords[1]];
        let b = [[coords[2], coords[3]], [coords[4], coords[5]]];
        let c = [coords[6], coords[7]];
        let proof = Proof::from_calldata(a, b, c);
        prop_assert_eq!(proof.to_calldata(), (a, b, c));
    }
}
