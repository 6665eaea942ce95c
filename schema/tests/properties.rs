//! Property tests over generated content trees.

use correctionlib_schema::serializer::json;
use correctionlib_schema::{
    Binning, Category, CategoryKey, Content, Correction, CorrectionSet, ErrorKind, Formula,
    FormulaParser, MultiBinning, Variable, VariableType,
};
use correctionlib_test_helpers::{object_pointers, with_extra_field};
use proptest::prelude::*;

fn edges() -> impl Strategy<Value = Vec<f64>> {
    (-100.0..100.0f64, prop::collection::vec(0.01..10.0f64, 1..4)).prop_map(|(start, steps)| {
        let mut edges = vec![start];
        for step in steps {
            let last = edges[edges.len() - 1];
            edges.push(last + step);
        }
        edges
    })
}

fn leaf() -> impl Strategy<Value = Content> {
    prop_oneof![
        (-1.0e3..1.0e3f64).prop_map(Content::from),
        (
            "[a-z0-9*+]{1,8}",
            prop_oneof![Just(FormulaParser::TFormula), Just(FormulaParser::Numexpr)],
            prop::collection::vec(0usize..4, 0..3),
        )
            .prop_map(|(expression, parser, parameters)| {
                Content::from(Formula::new(expression, parser, parameters))
            }),
    ]
}

fn keys() -> impl Strategy<Value = Vec<CategoryKey>> {
    prop_oneof![
        prop::collection::btree_set(-5i64..20, 0..4)
            .prop_map(|keys| keys.into_iter().map(CategoryKey::Int).collect()),
        prop::collection::btree_set("[a-z]{1,6}", 0..4)
            .prop_map(|keys| keys.into_iter().map(CategoryKey::Str).collect()),
    ]
}

fn content() -> impl Strategy<Value = Content> {
    leaf().prop_recursive(3, 48, 4, |inner| {
        let binning = {
            let inner = inner.clone();
            edges()
                .prop_flat_map(move |edges| {
                    let bins = edges.len() - 1;
                    (Just(edges), prop::collection::vec(inner.clone(), bins))
                })
                .prop_map(|(edges, content)| Content::from(Binning::new("x", edges, content).unwrap()))
        };
        let multibinning = {
            let inner = inner.clone();
            prop::collection::vec(edges(), 1..3)
                .prop_flat_map(move |axes| {
                    let cells: usize = axes.iter().map(|axis| axis.len() - 1).product();
                    (Just(axes), prop::collection::vec(inner.clone(), cells))
                })
                .prop_map(|(axes, content)| {
                    let inputs = (0..axes.len()).map(|k| format!("x{k}")).collect();
                    Content::from(MultiBinning::new(inputs, axes, content).unwrap())
                })
        };
        let category = keys()
            .prop_flat_map(move |keys| {
                let n = keys.len();
                (
                    Just(keys),
                    prop::collection::vec(inner.clone(), n),
                    prop::option::of(inner.clone()),
                )
            })
            .prop_map(|(keys, content, default)| {
                Content::from(Category::new("k", keys, content, default).unwrap())
            });
        prop_oneof![binning, multibinning, category]
    })
}

fn correction_set(data: Content, described: bool) -> CorrectionSet {
    let mut correction = Correction::new(
        "generated",
        3,
        vec![
            Variable::new("x", VariableType::Real),
            Variable::new("k", VariableType::Int).with_description("key"),
        ],
        Variable::new("weight", VariableType::Real),
        data,
    )
    .unwrap();
    if described {
        correction = correction.with_description("generated correction");
    }
    CorrectionSet::new(vec![correction])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn serialize_then_parse_is_identity(data in content(), described in any::<bool>()) {
        let set = correction_set(data, described);
        let text = json::to_string_pretty(&set).unwrap();
        let parsed = CorrectionSet::from_json_str(&text).unwrap();
        prop_assert_eq!(parsed, set);
    }

    #[test]
    fn serialization_is_deterministic(data in content()) {
        let set = correction_set(data, true);
        prop_assert_eq!(json::to_string_pretty(&set).unwrap(), json::to_string_pretty(&set.clone()).unwrap());
    }

    #[test]
    fn every_object_rejects_an_extra_field(data in content()) {
        let value = json::to_json(&correction_set(data, false));
        for pointer in object_pointers(&value) {
            let tampered = with_extra_field(&value, &pointer, "extra");
            let err = CorrectionSet::from_json_str(&tampered.to_string()).unwrap_err();
            prop_assert_eq!(
                err.kind(),
                &ErrorKind::UnrecognizedField { field: "extra".to_owned() },
                "pointer {}", pointer
            );
        }
    }

    #[test]
    fn only_version_one_is_accepted(version in -3i64..10) {
        let mut value = json::to_json(&correction_set(Content::from(1.0), false));
        value["schema_version"] = serde_json::json!(version);
        let result = CorrectionSet::from_json_str(&value.to_string());
        if version == 1 {
            prop_assert!(result.is_ok());
        } else {
            let err = result.unwrap_err();
            prop_assert_eq!(
                err.kind(),
                &ErrorKind::SchemaVersion { expected: 1, found: version }
            );
        }
    }

    #[test]
    fn bin_lookup_is_half_open(axis in edges(), t in 0.0..1.0f64) {
        let bins = axis.len() - 1;
        let binning = Binning::new("x", axis.clone(), vec![Content::from(0.0); bins]).unwrap();
        for (i, pair) in axis.windows(2).enumerate() {
            prop_assert_eq!(binning.bin_index(pair[0]), Some(i));
            let inside = pair[0] + t * (pair[1] - pair[0]);
            if inside < pair[1] {
                prop_assert_eq!(binning.bin_index(inside), Some(i));
            }
        }
        prop_assert_eq!(binning.bin_index(axis[bins]), None);
    }

    #[test]
    fn flat_index_inverts_bin_indices(first in edges(), second in edges()) {
        let cells = (first.len() - 1) * (second.len() - 1);
        let grid = MultiBinning::new(
            vec!["a".to_owned(), "b".to_owned()],
            vec![first, second],
            vec![Content::from(0.0); cells],
        )
        .unwrap();
        for flat in 0..cells {
            let indices = grid.bin_indices(flat).unwrap();
            prop_assert_eq!(grid.flat_index(&indices), Some(flat));
        }
    }
}
