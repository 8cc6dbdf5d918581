use cucumber::{given, then, when};
use std::thread;
use wordquiz_core::{EventKind, Message, MessageBuffer};
use wordquiz_tests::BusWorld;

// ===== Given Steps =====

#[given("an empty message buffer")]
async fn empty_buffer(world: &mut BusWorld) {
    world.buffer = MessageBuffer::new();
    world.drained.clear();
}

// ===== When Steps =====

#[when(expr = "{string} adds a {string} message to the buffer")]
async fn add_message(world: &mut BusWorld, sender: String, kind: String) {
    let msg = Message::new(EventKind::from(kind), BusWorld::player_id(&sender));
    world.buffer.add(msg);
}

#[when(expr = "{int} threads each add {int} messages to the buffer")]
async fn concurrent_adds(world: &mut BusWorld, threads: usize, per_thread: usize) {
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let buffer = world.buffer.clone();
            thread::spawn(move || {
                let sender = BusWorld::player_id(&format!("T{}", t));
                for i in 0..per_thread {
                    buffer.add(
                        Message::answer_result(sender.clone(), true).with_turn_index(i as i32),
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("producer thread panicked");
    }
}

#[when("the buffer is drained")]
async fn drain(world: &mut BusWorld) {
    world.drained = world.buffer.drain_all();
}

// ===== Then Steps =====

#[then(expr = "{int} message(s) is/are drained")]
async fn drained_count(world: &mut BusWorld, count: usize) {
    assert_eq!(world.drained.len(), count);
}

#[then(expr = "the drained senders are {string}")]
async fn drained_senders(world: &mut BusWorld, senders: String) {
    let actual: Vec<String> = world
        .drained
        .iter()
        .map(|m| m.sender_id().to_string())
        .collect();
    assert_eq!(actual, BusWorld::names(&senders));
}

#[then("the buffer is empty")]
async fn buffer_empty(world: &mut BusWorld) {
    assert!(world.buffer.is_empty());
}

#[then("every producer's messages are in order")]
async fn per_producer_order(world: &mut BusWorld) {
    let mut last_turn = std::collections::HashMap::new();
    for msg in &world.drained {
        let previous = last_turn.insert(msg.sender_id().to_string(), msg.turn_index());
        if let Some(previous) = previous {
            assert!(
                previous < msg.turn_index(),
                "{} out of order",
                msg.sender_id()
            );
        }
    }
}
