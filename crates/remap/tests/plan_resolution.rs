mod support;

use support::{User, UserDto};

use remap::Mapper;

use std::sync::Arc;
use std::thread;

// ---------------------------------------------------------------------------
// Idempotent resolution
// ---------------------------------------------------------------------------

#[test]
fn same_pair_resolves_to_identical_plan() {
    let mapper = Mapper::builder().build().unwrap();

    let first = mapper.resolve::<User, UserDto>().unwrap();
    let second = mapper.resolve::<User, UserDto>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn declared_plan_is_returned_unchanged() {
    let mut builder = Mapper::builder();
    builder.create_map::<User, UserDto>();
    let mapper = builder.build().unwrap();

    let first = mapper.resolve::<User, UserDto>().unwrap();
    let second = mapper.resolve::<User, UserDto>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.lookups().len(), 2);
}

// ---------------------------------------------------------------------------
// Concurrent first resolution
// ---------------------------------------------------------------------------

#[test]
fn concurrent_first_resolution_builds_one_plan() {
    let mapper = Mapper::builder().build().unwrap();

    let plans: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let mapper = mapper.clone();
                scope.spawn(move || mapper.resolve::<User, UserDto>().unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for plan in &plans[1..] {
        assert!(Arc::ptr_eq(&plans[0], plan));
    }
}

// ---------------------------------------------------------------------------
// Auto-creation disabled
// ---------------------------------------------------------------------------

#[test]
fn unknown_pair_without_auto_create() {
    let mut builder = Mapper::builder();
    builder.auto_create(false);
    let mapper = builder.build().unwrap();

    let err = mapper.resolve::<User, UserDto>().unwrap_err();
    assert!(err.is_configuration());
    let message = err.to_string();
    assert!(message.contains("User"));
    assert!(message.contains("UserDto"));
}

#[test]
fn declared_pairs_still_resolve_without_auto_create() {
    let mut builder = Mapper::builder();
    builder.auto_create(false);
    builder.create_map::<User, UserDto>();
    let mapper = builder.build().unwrap();

    assert!(mapper.resolve::<User, UserDto>().is_ok());
    assert!(mapper.resolve::<UserDto, User>().is_err());
}
