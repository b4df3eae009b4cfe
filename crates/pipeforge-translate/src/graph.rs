//! Dataflow view of a built pipeline using `petgraph`.
//!
//! Leaf components become graph nodes. Children of a sequential container
//! are chained so each consumes the output of the previous one; children of
//! a parallel container all consume the container's input and their outputs
//! are merged. The graph only describes the pipeline, it never runs it.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use pipeforge_common::constants::ROOT_LOCATION;
use pipeforge_common::error::{PipeforgeError, Result};
use pipeforge_common::types::ContainerKind;
use serde::Serialize;

use crate::component::Component;

/// A leaf stage in the dataflow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    /// Labels from the root down to this stage, e.g. `root/step_1/step_0`.
    pub path: String,
    /// Registry name of the leaf component.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Directed acyclic graph of leaf stages.
#[derive(Debug)]
pub struct StageGraph {
    graph: petgraph::Graph<Stage, ()>,
}

impl StageGraph {
    /// Builds the dataflow graph of a component tree.
    #[must_use]
    pub fn from_component(root: &dyn Component) -> Self {
        let mut graph = Self {
            graph: petgraph::Graph::new(),
        };
        let _ = graph.add(root, ROOT_LOCATION, &[]);
        graph
    }

    /// Adds `component` fed by `inputs` and returns the nodes producing its
    /// output. An empty container passes its inputs through.
    fn add(
        &mut self,
        component: &dyn Component,
        path: &str,
        inputs: &[NodeIndex],
    ) -> Vec<NodeIndex> {
        match component.container_kind() {
            None => {
                let node = self.graph.add_node(Stage {
                    path: path.to_owned(),
                    type_name: component.type_name().to_owned(),
                });
                for &input in inputs {
                    let _ = self.graph.add_edge(input, node, ());
                }
                vec![node]
            }
            Some(ContainerKind::Sequential) => {
                let mut current = inputs.to_vec();
                for child in component.children() {
                    let child_path = format!("{path}/{}", child.label);
                    current = self.add(child.component.as_ref(), &child_path, &current);
                }
                current
            }
            Some(ContainerKind::Parallel) => {
                if component.children().is_empty() {
                    return inputs.to_vec();
                }
                let mut outputs = Vec::new();
                for child in component.children() {
                    let child_path = format!("{path}/{}", child.label);
                    outputs.extend(self.add(child.component.as_ref(), &child_path, inputs));
                }
                outputs
            }
        }
    }

    /// Number of leaf stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dataflow edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn topological(&self) -> Result<Vec<NodeIndex>> {
        petgraph::algo::toposort(&self.graph, None).map_err(|_cycle| PipeforgeError::Config {
            message: "cyclic dataflow detected in stage graph".into(),
        })
    }

    /// Stages in an order where every stage follows all of its inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph contains a cycle.
    pub fn execution_order(&self) -> Result<Vec<&Stage>> {
        let order = self.topological()?;
        Ok(order
            .into_iter()
            .filter_map(|idx| self.graph.node_weight(idx))
            .collect())
    }

    /// Groups stages into layers: a stage sits one layer after the deepest
    /// of its inputs, so stages in the same layer are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph contains a cycle.
    pub fn layers(&self) -> Result<Vec<Vec<&Stage>>> {
        let order = self.topological()?;
        let mut depth: HashMap<NodeIndex, usize> = HashMap::new();
        let mut layers: Vec<Vec<&Stage>> = Vec::new();
        for idx in order {
            let level = self
                .graph
                .neighbors_directed(idx, petgraph::Direction::Incoming)
                .filter_map(|input| depth.get(&input))
                .map(|d| d + 1)
                .max()
                .unwrap_or(0);
            let _ = depth.insert(idx, level);
            if layers.len() <= level {
                layers.resize_with(level + 1, Vec::new);
            }
            if let Some(stage) = self.graph.node_weight(idx) {
                layers[level].push(stage);
            }
        }
        Ok(layers)
    }
}
