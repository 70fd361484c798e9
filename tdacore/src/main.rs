use tdacore::data::diagram::PersistenceDiagram;

fn main() {
    let diagram = PersistenceDiagram::from_triples(&[(0.0, 1.0, 0), (0.0, 3.0, 1), (1.0, 2.0, 1)])
        .expect("valid triples");

    println!("{}", diagram);
    println!("loops: {}", diagram.count_features(1));
    println!("average loop lifetime: {}", diagram.average_lifetime(1));
    println!(
        "relevant loops (theta = 0.5): {}",
        diagram.count_relevant_features(1, 0.5).expect("valid theta")
    );
}
