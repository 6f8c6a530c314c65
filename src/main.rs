use network_flow::{FlowError, MaxFlow, solve_max_flow};

fn print_flows(result: &MaxFlow<&'static str, f64>) {
    for edge in result.edges() {
        if edge.flow > 0.0 {
            println!(
                "{} -[{}/{}]-> {} ({:.0}%)",
                edge.from,
                edge.flow,
                edge.capacity,
                edge.to,
                edge.utilization() * 100.0
            );
        }
    }
}

fn main() -> Result<(), FlowError<&'static str, f64>> {
    env_logger::init();

    let from_solar = 40.0;
    let from_grid = 30.0;
    let from_battery = 10.0;

    let to_grid = 10.0;
    let to_battery = 50.0;
    let to_charger = 20.0;

    let routes = f64::INFINITY;

    let edges = vec![
        // Supply
        ("supply", "solar", from_solar),
        ("supply", "grid_source", from_grid),
        ("supply", "battery_source", from_battery),
        // Routing
        ("solar", "charger", routes),
        ("solar", "grid_sink", routes),
        ("solar", "battery_sink", routes),
        ("grid_source", "charger", routes),
        ("grid_source", "battery_sink", routes),
        ("battery_source", "charger", routes),
        ("battery_source", "grid_sink", routes),
        // Demand
        ("charger", "demand", to_charger),
        ("battery_sink", "demand", to_battery),
        ("grid_sink", "demand", to_grid),
    ];

    let result = solve_max_flow(edges, &"supply", &"demand")?;

    println!("Maximum flow: {}", result.value());
    print_flows(&result);

    if let Some(cut) = result.min_cut() {
        println!("Minimum cut ({}):", cut.capacity());
        for (from, to) in cut.edges() {
            println!("  {} -> {}", from, to);
        }
    }

    Ok(())
}
