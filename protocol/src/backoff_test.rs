use super::*;

fn ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[test]
fn starts_at_one_second() {
    assert_eq!(ms(Backoff::new().current()), 1_000);
}

#[test]
fn three_disconnects_wait_1000_1500_2250() {
    let mut backoff = Backoff::new();
    let delays: Vec<u64> = (0..3).map(|_| ms(backoff.next_delay())).collect();
    assert_eq!(delays, vec![1_000, 1_500, 2_250]);
}

#[test]
fn delay_never_exceeds_cap() {
    let mut backoff = Backoff::new();
    let mut last = 0;
    for _ in 0..50 {
        last = ms(backoff.next_delay());
        assert!(last <= MAX_DELAY_MS);
    }
    assert_eq!(last, MAX_DELAY_MS);
}

#[test]
fn reset_returns_to_initial_delay() {
    let mut backoff = Backoff::new();
    for _ in 0..5 {
        backoff.next_delay();
    }
    backoff.reset();
    assert_eq!(ms(backoff.next_delay()), INITIAL_DELAY_MS);
}
