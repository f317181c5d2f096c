//! Rendering of query results as human-readable text or JSON.

use graph_cities_core::{Dijkstra, Graph, NodeIndex, ShortestPath};
use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn names<'g>(graph: &'g Graph, indices: &[NodeIndex]) -> Vec<&'g str> {
    indices.iter().map(|&i| graph.nodes()[i].name()).collect()
}

pub fn edges(graph: &Graph, format: OutputFormat) -> anyhow::Result<()> {
    let list = graph.edge_list_names();
    match format {
        OutputFormat::Json => print_json(
            &list
                .iter()
                .map(|(weight, from, to)| json!({ "weight": weight, "from": from, "to": to }))
                .collect::<Vec<_>>(),
        ),
        OutputFormat::Human => {
            for (weight, from, to) in list {
                println!("{} -- {} ({})", from, to, weight);
            }
            Ok(())
        }
    }
}

pub fn adjacency(graph: &Graph, format: OutputFormat) -> anyhow::Result<()> {
    let list = graph.adjacency_list_names();
    match format {
        OutputFormat::Json => print_json(
            &graph
                .nodes()
                .iter()
                .zip(&list)
                .map(|(node, neighbors)| {
                    json!({
                        "node": node.name(),
                        "neighbors": neighbors
                            .iter()
                            .map(|(name, weight)| json!({ "name": name, "weight": weight }))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect::<Vec<_>>(),
        ),
        OutputFormat::Human => {
            for (node, neighbors) in graph.nodes().iter().zip(list) {
                if neighbors.is_empty() {
                    println!("{}: (isolated)", node.name());
                } else {
                    let joined: Vec<String> = neighbors
                        .iter()
                        .map(|(name, weight)| format!("{}({})", name, weight))
                        .collect();
                    println!("{}: {}", node.name(), joined.join(", "));
                }
            }
            Ok(())
        }
    }
}

pub fn matrix(graph: &Graph, format: OutputFormat) -> anyhow::Result<()> {
    let matrix = graph.adjacency_matrix();
    match format {
        OutputFormat::Json => print_json(&json!({ "nodes": graph.names(), "matrix": matrix })),
        OutputFormat::Human => {
            let width = matrix
                .iter()
                .flatten()
                .map(|w| w.to_string().len())
                .max()
                .unwrap_or(1);
            for row in &matrix {
                let cells: Vec<String> = row.iter().map(|w| format!("{:>width$}", w)).collect();
                println!("{}", cells.join(" "));
            }
            Ok(())
        }
    }
}

pub fn traversal(
    graph: &Graph,
    start: NodeIndex,
    order: &[NodeIndex],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let order_names = names(graph, order);
    match format {
        OutputFormat::Json => print_json(&json!({
            "start": graph.nodes()[start].name(),
            "order": order_names,
            "indices": order,
        })),
        OutputFormat::Human => {
            println!("{}", order_names.join(", "));
            Ok(())
        }
    }
}

pub fn path(graph: &Graph, route: &ShortestPath, format: OutputFormat) -> anyhow::Result<()> {
    let path_names = route.names(graph);
    match format {
        OutputFormat::Json => print_json(&json!({
            "path": path_names,
            "indices": route.path,
            "distance": route.distance,
            "hops": route.hops(),
        })),
        OutputFormat::Human => {
            println!(
                "{} (distance {}, {} hops)",
                path_names.join(" -> "),
                route.distance,
                route.hops()
            );
            Ok(())
        }
    }
}

pub fn paths(graph: &Graph, all: &Dijkstra, format: OutputFormat) -> anyhow::Result<()> {
    let rows: Vec<(NodeIndex, Option<ShortestPath>)> = (0..graph.node_count())
        .map(|end| (end, all.path_to(end)))
        .collect();

    match format {
        OutputFormat::Json => print_json(&json!({
            "from": graph.nodes()[all.start].name(),
            "paths": rows
                .iter()
                .map(|(end, route)| json!({
                    "to": graph.nodes()[*end].name(),
                    "distance": route.as_ref().map(|r| r.distance),
                    "path": route.as_ref().map(|r| r.names(graph)),
                }))
                .collect::<Vec<_>>(),
        })),
        OutputFormat::Human => {
            println!("{:<16} {:<10} Path", "Destination", "Distance");
            for (end, route) in &rows {
                let dest = graph.nodes()[*end].name();
                match route {
                    Some(route) => println!(
                        "{:<16} {:<10} {}",
                        dest,
                        route.distance,
                        route.names(graph).join(" -> ")
                    ),
                    None => println!("{:<16} {:<10} no path", dest, "-"),
                }
            }
            Ok(())
        }
    }
}

pub fn components(graph: &Graph, format: OutputFormat) -> anyhow::Result<()> {
    let components: Vec<Vec<&str>> = graph
        .connected_components()
        .iter()
        .map(|c| names(graph, c))
        .collect();
    match format {
        OutputFormat::Json => print_json(&components),
        OutputFormat::Human => {
            for (i, component) in components.iter().enumerate() {
                println!("Component {}: {}", i + 1, component.join(", "));
            }
            Ok(())
        }
    }
}

pub fn degree(graph: &Graph, top_n: usize, format: OutputFormat) -> anyhow::Result<()> {
    let ranking = graph.degree_ranking(top_n);
    match format {
        OutputFormat::Json => print_json(&ranking),
        OutputFormat::Human => {
            for entry in &ranking {
                println!("{:>4}  {}", entry.degree, entry.name);
            }
            Ok(())
        }
    }
}

pub fn stats(graph: &Graph, format: OutputFormat) -> anyhow::Result<()> {
    let stats = graph.stats();
    match format {
        OutputFormat::Json => print_json(&stats),
        OutputFormat::Human => {
            let yes_no = |b: bool| if b { "yes" } else { "no" };
            println!("Nodes: {}", stats.node_count);
            println!("Edges: {}", stats.edge_count);
            println!("Connections: {}", stats.connection_count);
            println!("Connected: {}", yes_no(stats.is_connected));
            println!("Has cycle: {}", yes_no(stats.has_cycle));
            println!("Density: {:.3}", stats.density);
            println!("Components: {}", stats.component_count);
            if let Some(degree) = &stats.degree {
                println!("Min degree: {}", degree.min);
                println!("Max degree: {}", degree.max);
                println!("Avg degree: {:.2}", degree.avg);
            }
            Ok(())
        }
    }
}
