use cucumber::{given, then, when};
use std::time::Duration;
use wordquiz_core::{EventKind, Message};
use wordquiz_p2p::{DispatchLoop, DispatcherState};
use wordquiz_tests::{BusWorld, TEST_INTERVAL_MS};

// ===== Given Steps =====

#[given(expr = "dispatchers for players {string} are running")]
async fn dispatchers_running(world: &mut BusWorld, names: String) {
    for name in BusWorld::names(&names) {
        world.add_peer(&name);
    }
}

// ===== When Steps =====

#[when(expr = "{string} broadcasts a question")]
async fn broadcasts_question(world: &mut BusWorld, name: String) {
    let msg = Message::broadcast_question(BusWorld::player_id(&name));
    world.peer(&name).send(msg);
}

#[when(expr = "{string} relays a {string} from {string}")]
async fn relays(world: &mut BusWorld, relay: String, kind: String, origin: String) {
    let msg = Message::new(EventKind::from(kind), BusWorld::player_id(&origin));
    world.peer(&relay).send(msg);
}

#[when(regex = r#"^"(\S+)" sends an answer result with payload (.+)$"#)]
async fn sends_answer_payload(world: &mut BusWorld, name: String, payload: String) {
    let payload: serde_json::Value =
        serde_json::from_str(&payload).expect("payload must be valid JSON");
    let msg = Message::new(EventKind::AnswerResult, BusWorld::player_id(&name)).with_payload(payload);
    world.peer(&name).send(msg);
}

#[when("one dispatch interval passes")]
async fn one_interval(world: &mut BusWorld) {
    for dispatcher in world.peers.values_mut() {
        dispatcher.tick();
    }
}

#[when(expr = "the dispatch loops run for {int} intervals")]
async fn loops_run(world: &mut BusWorld, intervals: u32) {
    let peers = std::mem::take(&mut world.peers);
    let mut handles = Vec::with_capacity(peers.len());
    for (name, dispatcher) in peers {
        let handle = DispatchLoop::spawn(dispatcher).expect("loop failed to spawn");
        handles.push((name, handle));
    }

    tokio::time::sleep(Duration::from_millis(TEST_INTERVAL_MS) * intervals).await;

    for (name, handle) in handles {
        let dispatcher = handle.shutdown().await.expect("loop failed");
        world.peers.insert(name, dispatcher);
    }
}

// ===== Then Steps =====

#[then(expr = "{string} loaded {int} question(s)")]
async fn loaded_questions(world: &mut BusWorld, name: String, count: u32) {
    assert_eq!(world.peer(&name).consumer().questions_loaded, count, "player {}", name);
}

#[then(expr = "{string} recorded answer results {string}")]
async fn recorded_results(world: &mut BusWorld, name: String, results: String) {
    let expected: Vec<bool> = BusWorld::names(&results)
        .iter()
        .map(|r| r.parse().expect("expected true/false"))
        .collect();
    assert_eq!(world.peer(&name).consumer().answer_results, expected);
}

#[then(expr = "{string} counted {int} payload mismatch(es)")]
async fn payload_mismatches(world: &mut BusWorld, name: String, count: u64) {
    assert_eq!(world.peer(&name).stats().payload_mismatches, count);
}

#[then(expr = "{string} dropped {int} unknown message(s)")]
async fn dropped_unknown(world: &mut BusWorld, name: String, count: u64) {
    assert_eq!(world.peer(&name).stats().dropped_unknown, count);
}

#[then(expr = "{string} skipped {int} self-originated message(s)")]
async fn skipped_self(world: &mut BusWorld, name: String, count: u64) {
    assert_eq!(world.peer(&name).stats().skipped_self, count);
}

#[then(expr = "{string} sees remote health {int}")]
async fn remote_health(world: &mut BusWorld, name: String, health: u32) {
    assert_eq!(world.peer(&name).consumer().remote_health.current(), health);
}

#[then("every dispatcher is stopped")]
async fn all_stopped(world: &mut BusWorld) {
    for (name, dispatcher) in &world.peers {
        assert_eq!(dispatcher.state(), DispatcherState::Stopped, "player {}", name);
    }
}
