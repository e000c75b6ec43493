use crate::ClientCounter;

use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_new_counter_when_read_then_zero() {
    assert_that!(ClientCounter::new().get(), eq(0));
}

#[test]
fn given_two_connects_and_one_disconnect_when_read_then_one() {
    let counter = ClientCounter::new();

    counter.connected();
    counter.connected();
    let remaining = counter.disconnected();

    assert_that!(remaining, eq(1));
    assert_that!(counter.get(), eq(1));
}

#[test]
fn given_zero_clients_when_disconnected_then_stays_zero() {
    let counter = ClientCounter::new();

    let remaining = counter.disconnected();

    assert_that!(remaining, eq(0));
    assert_that!(counter.get(), eq(0));
}
