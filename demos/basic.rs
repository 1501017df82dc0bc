//! Basic walkthrough: bootstrap a ring, join members, route some keys.

use chordal::{Ring, RingConfig};

fn main() -> chordal::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("chordal=debug,info")
        .init();

    // A ring of 2^5 = 32 identifiers
    let mut ring = Ring::new(RingConfig::new(5))?;

    println!("Bootstrapping node 1 on a ring of {} identifiers...", ring.size());
    ring.join(1, None)?;
    for id in [8, 14, 21, 28] {
        ring.join(id, Some(1))?;
    }
    println!("Members: {:?}", ring.joined_nodes());

    println!("\n--- Key operations ---");
    let owner = ring.put(1, 17, "hello ring")?;
    println!("put 17 -> owned by node {}", owner);

    if let Some(value) = ring.get(28, 17)? {
        println!("get 17 from node 28 -> {:?}", String::from_utf8_lossy(&value));
    }

    match ring.del(8, 17)? {
        Some(prior) => println!("del 17 -> removed {:?}", String::from_utf8_lossy(&prior)),
        None => println!("del 17 -> nothing was stored"),
    }

    println!("\n--- Finger table of node 1 ---");
    for row in ring.finger_table(1)? {
        println!("  start {:>2} -> node {}", row.start, row.node);
    }

    let stats = ring.stats();
    println!("\nRing stats:");
    println!("  Size: {}", stats.size);
    println!("  Joined: {}", stats.joined_count);
    println!("  Stored keys: {}", stats.stored_keys);

    Ok(())
}
