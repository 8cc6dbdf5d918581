use cucumber::{given, then, when};
use wordquiz_core::{EventKind, Message};
use wordquiz_p2p::{Transport, TransportError};
use wordquiz_tests::BusWorld;

// ===== Given Steps =====

#[given(expr = "simulated peers {string} are connected")]
async fn peers_connected(world: &mut BusWorld, names: String) {
    for name in BusWorld::names(&names) {
        world.add_transport(&name, true);
    }
}

#[given(expr = "a simulated peer {string} that is not initialized")]
async fn peer_not_initialized(world: &mut BusWorld, name: String) {
    world.add_transport(&name, false);
}

// ===== When Steps =====

#[when(expr = "simulated peer {string} connects")]
async fn peer_connects(world: &mut BusWorld, name: String) {
    world.add_transport(&name, true);
}

#[when(expr = "{string} sends a {string} message")]
async fn transport_sends(world: &mut BusWorld, name: String, kind: String) {
    let msg = Message::new(EventKind::from(kind), BusWorld::player_id(&name));
    world.transport(&name).send(msg);
}

#[when(expr = "{string} shuts down")]
async fn transport_shuts_down(world: &mut BusWorld, name: String) {
    world
        .transport(&name)
        .shutdown()
        .expect("shutdown should not fail");
}

// ===== Then Steps =====

#[then(expr = "{string} received {int} message(s)")]
async fn received_count(world: &mut BusWorld, name: String, count: usize) {
    assert_eq!(world.inbox(&name).received().len(), count, "peer {}", name);
}

#[then(expr = "{string} received a message from {string}")]
async fn received_from(world: &mut BusWorld, name: String, sender: String) {
    let received = world.inbox(&name).received();
    assert!(
        received.iter().any(|m| m.sender_id() == sender.as_str()),
        "{} got nothing from {}",
        name,
        sender
    );
}

#[then(expr = "{string} saw a not-connected error")]
async fn saw_not_connected(world: &mut BusWorld, name: String) {
    assert!(world
        .inbox(&name)
        .errors()
        .contains(&TransportError::NotConnected));
}

#[then(expr = "the network has {int} peer(s)")]
async fn network_size(world: &mut BusWorld, count: usize) {
    assert_eq!(world.network.peer_count(), count);
}
