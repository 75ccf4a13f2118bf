//! Independent graphs share nothing and can be built on separate threads.

mod support;

use std::sync::Arc;

use pf_graph::{ExecutionOrder, Graph};
use rayon::prelude::*;
use support::{Pipeline, Read, Recorder};

fn word_count() -> Graph {
    let mut graph = Graph::default();
    let lines = graph.apply_root(Arc::new(Read)).unwrap();
    graph.apply(None, &lines, Arc::new(Pipeline)).unwrap();
    graph.apply(None, &lines, Arc::new(Pipeline)).unwrap();
    graph
}

#[test]
fn parallel_graphs_are_identical_and_independent() {
    let shapes: Vec<Vec<String>> = (0..32)
        .into_par_iter()
        .map(|_| {
            let graph = word_count();
            graph.nodes().map(|n| n.full_name().to_owned()).collect()
        })
        .collect();

    for shape in &shapes {
        assert_eq!(shape, &shapes[0]);
    }
    assert!(shapes[0].contains(&"Pipeline2/Count/Sum".to_owned()));
}

#[test]
fn traversal_can_run_on_another_thread() {
    let graph = word_count();
    let expected = graph.artifacts().len();
    let handle = std::thread::spawn(move || {
        let mut graph = graph;
        let mut order = ExecutionOrder::new();
        graph.traverse(&mut order).map(|()| order)
    });
    let order = handle.join().unwrap().unwrap();
    assert_eq!(order.artifacts().len(), expected);
    assert_eq!(order.primitives().len(), 5);
}

#[test]
fn traversal_is_deterministic() {
    let events: Vec<Vec<String>> = (0..8)
        .into_par_iter()
        .map(|_| {
            let mut graph = word_count();
            let mut recorder = Recorder::default();
            graph.traverse(&mut recorder).unwrap();
            recorder.events
        })
        .collect();
    assert!(events.windows(2).all(|w| w[0] == w[1]));
}
