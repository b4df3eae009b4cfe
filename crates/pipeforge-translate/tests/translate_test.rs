//! End-to-end translation through the public API with user-defined
//! components.

use std::any::Any;

use pipeforge_common::config::PipeforgeConfig;
use pipeforge_common::types::{ContainerKind, Params};
use pipeforge_translate::component::{BoxedComponent, Component, Container};
use pipeforge_translate::graph::StageGraph;
use pipeforge_translate::outline::Outline;
use pipeforge_translate::registry::ComponentRegistry;
use pipeforge_translate::{Translator, pipeline_from_definition};
use serde_json::{Value, json};

/// A leaf that reads its parameters into typed fields.
#[derive(Debug)]
struct Pca {
    n_components: u64,
    params: Params,
}

impl Component for Pca {
    fn type_name(&self) -> &str {
        "sklearn.decomposition.PCA"
    }

    fn params(&self) -> Option<&Params> {
        Some(&self.params)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn registry() -> ComponentRegistry {
    let config = PipeforgeConfig {
        sequential_container: "sklearn.pipeline.Pipeline".into(),
        parallel_container: "sklearn.pipeline.FeatureUnion".into(),
        components: vec![
            "sklearn.preprocessing.MinMaxScaler".into(),
            "sklearn.impute.SimpleImputer".into(),
        ],
    };
    let mut registry = ComponentRegistry::from_config(&config).expect("catalog registry");
    registry
        .register_leaf("sklearn.decomposition.PCA", |params| {
            let n_components = match params.get("n_components") {
                None => 2,
                Some(value) => value.as_u64().ok_or("n_components must be a positive integer")?,
            };
            Ok(Box::new(Pca {
                n_components,
                params,
            }) as BoxedComponent)
        })
        .expect("register PCA");
    registry
}

fn definition() -> Value {
    json!({
        "sklearn.pipeline.Pipeline": {
            "steps": [
                {"sklearn.impute.SimpleImputer": {"strategy": "median"}},
                {"sklearn.pipeline.FeatureUnion": [
                    {"sklearn.decomposition.PCA": {"n_components": 5}},
                    "sklearn.preprocessing.MinMaxScaler"
                ]},
                "sklearn.decomposition.PCA"
            ],
            "memory": null
        }
    })
}

#[test]
fn builds_typed_components_inside_containers() {
    let registry = registry();
    let pipeline = pipeline_from_definition(&definition(), &registry).expect("should build");

    let root = pipeline
        .downcast_ref::<Container>()
        .expect("root is a container");
    assert_eq!(root.type_name(), "sklearn.pipeline.Pipeline");
    assert_eq!(root.kind(), ContainerKind::Sequential);
    assert_eq!(root.params().and_then(|p| p.get("memory")), Some(&Value::Null));

    let union = root.child("step_1").expect("step_1");
    assert_eq!(union.container_kind(), Some(ContainerKind::Parallel));
    let inner = union.children()[0]
        .component
        .downcast_ref::<Pca>()
        .expect("PCA inside union");
    assert_eq!(inner.n_components, 5);

    let last = root
        .child("step_2")
        .and_then(|c| c.downcast_ref::<Pca>())
        .expect("default PCA");
    assert_eq!(last.n_components, 2);
    assert!(last.params.is_empty());
}

#[test]
fn constructor_rejection_surfaces_its_message() {
    let registry = registry();
    let definition = json!([
        "sklearn.preprocessing.MinMaxScaler",
        {"sklearn.decomposition.PCA": {"n_components": "many"}}
    ]);
    let err = pipeline_from_definition(&definition, &registry).unwrap_err();
    assert_eq!(err.to_string(), "n_components must be a positive integer");
    assert!(!err.is_malformed());
    assert!(!err.is_unresolvable());
}

#[test]
fn top_level_sequence_uses_configured_parallel_container() {
    let registry = registry();
    let definition = json!(["sklearn.impute.SimpleImputer", "sklearn.preprocessing.MinMaxScaler"]);
    let pipeline = pipeline_from_definition(&definition, &registry).expect("should build");
    assert_eq!(pipeline.type_name(), "sklearn.pipeline.FeatureUnion");
    assert_eq!(pipeline.children().len(), 2);
}

#[test]
fn stage_graph_follows_dataflow() {
    let registry = registry();
    let pipeline = pipeline_from_definition(&definition(), &registry).expect("should build");
    let graph = StageGraph::from_component(pipeline.as_ref());
    assert_eq!(graph.stage_count(), 4);
    // Imputer->PCA, Imputer->Scaler, PCA->PCA, Scaler->PCA
    assert_eq!(graph.edge_count(), 4);

    let layers = graph.layers().expect("acyclic");
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[0][0].path, "root/step_0");
    assert_eq!(layers[2][0].path, "root/step_2");
}

#[test]
fn concurrent_translations_share_one_registry() {
    let registry = registry();
    let definition = definition();
    let expected = Outline::of(
        pipeline_from_definition(&definition, &registry)
            .expect("should build")
            .as_ref(),
    );
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let translator = Translator::new(&registry);
                    let pipeline = translator.translate(&definition).expect("should build");
                    Outline::of(pipeline.as_ref())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), expected);
        }
    });
}

#[test]
fn misspelled_module_path_points_at_registered_name() {
    let registry = registry();
    let definition = json!({
        "sklearn.pipeline.Pipeline": [
            "sklearn.impute.SimpleImputer",
            {"sklearn.decompositon.PCA": {"n_components": 3}}
        ]
    });
    let err = pipeline_from_definition(&definition, &registry).unwrap_err();
    assert!(err.is_unresolvable());
    assert_eq!(
        err.to_string(),
        "unresolvable type \"sklearn.decompositon.PCA\" at root[1] \
         (did you mean sklearn.decomposition.PCA?)"
    );
}
