//! Role resolution against an in-process directory
//!
//! What these tests verify:
//! - N concurrent callers for one uncached role cause exactly one lookup
//! - lookups for different roles run side by side
//! - a failed lookup is not cached and does not affect other roles
//! - separate caches do not share entries

use std::sync::Arc;
use std::time::Duration;

use capa_e2e::multitenancy::{RoleArnCache, RoleResolver};
use capa_e2e::MultitenancyRole;

use super::helpers::{test_arn, CountingDirectory};

const CONCURRENT_CALLERS: usize = 16;

fn new_resolver() -> Arc<RoleResolver> {
    Arc::new(RoleResolver::new(Arc::new(RoleArnCache::new())))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_one_lookup() {
    let resolver = new_resolver();
    let directory = Arc::new(CountingDirectory::new().with_delay(Duration::from_millis(50)));

    let handles: Vec<_> = (0..CONCURRENT_CALLERS)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            let directory = Arc::clone(&directory);
            tokio::spawn(async move {
                resolver
                    .role_arn_with(MultitenancyRole::Nested, &*directory)
                    .await
            })
        })
        .collect();

    let expected = test_arn("CAPAMultiTenancyNested");
    for handle in handles {
        let arn = handle
            .await
            .expect("task should not panic")
            .expect("lookup should succeed");
        assert_eq!(arn, expected);
    }

    assert_eq!(directory.lookups("CAPAMultiTenancyNested"), 1);
    assert_eq!(
        resolver.cache().get("CAPAMultiTenancyNested"),
        Some(expected)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_roles_do_not_wait_on_each_other() {
    let resolver = new_resolver();
    let directory = Arc::new(CountingDirectory::new().with_delay(Duration::from_millis(200)));

    let handles: Vec<_> = MultitenancyRole::ALL
        .into_iter()
        .map(|role| {
            let resolver = Arc::clone(&resolver);
            let directory = Arc::clone(&directory);
            tokio::spawn(async move { resolver.role_arn_with(role, &*directory).await })
        })
        .collect();

    for handle in handles {
        handle
            .await
            .expect("task should not panic")
            .expect("lookup should succeed");
    }

    assert_eq!(directory.max_in_flight(), MultitenancyRole::ALL.len());
    assert_eq!(directory.total_lookups(), MultitenancyRole::ALL.len());
    assert_eq!(resolver.cache().len(), MultitenancyRole::ALL.len());
}

#[tokio::test]
async fn repeated_calls_hit_the_cache() {
    let resolver = new_resolver();
    let directory = CountingDirectory::new();

    for _ in 0..5 {
        for role in MultitenancyRole::ALL {
            let arn = resolver
                .role_arn_with(role, &directory)
                .await
                .expect("lookup should succeed");
            assert_eq!(arn, test_arn(&role.role_name()));
        }
    }

    for role in MultitenancyRole::ALL {
        assert_eq!(directory.lookups(&role.role_name()), 1);
    }
}

#[tokio::test]
async fn failure_is_retried_on_next_call_and_isolated() {
    let resolver = new_resolver();
    let directory = CountingDirectory::new().failing("CAPAMultiTenancyJump");

    let err = resolver
        .role_arn_with(MultitenancyRole::Jump, &directory)
        .await
        .unwrap_err();
    let cause = std::error::Error::source(&err).expect("lookup error should be kept");
    assert!(cause.to_string().contains("cannot be found"));

    let simple = resolver
        .role_arn_with(MultitenancyRole::Simple, &directory)
        .await
        .expect("simple should resolve despite jump failing");
    assert_eq!(simple, test_arn("CAPAMultiTenancySimple"));

    assert!(resolver
        .role_arn_with(MultitenancyRole::Jump, &directory)
        .await
        .is_err());

    assert_eq!(directory.lookups("CAPAMultiTenancyJump"), 2);
    assert_eq!(directory.lookups("CAPAMultiTenancySimple"), 1);
    assert!(resolver.cache().get("CAPAMultiTenancyJump").is_none());
    assert_eq!(resolver.cache().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_failures_never_overlap() {
    let resolver = new_resolver();
    let directory = Arc::new(
        CountingDirectory::new()
            .failing("CAPAMultiTenancySimple")
            .with_delay(Duration::from_millis(20)),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            let directory = Arc::clone(&directory);
            tokio::spawn(async move {
                resolver
                    .role_arn_with(MultitenancyRole::Simple, &*directory)
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.expect("task should not panic").is_err());
    }

    assert_eq!(directory.max_in_flight(), 1);
    assert!(resolver.cache().is_empty());
}

#[tokio::test]
async fn separate_caches_are_independent() {
    let first = new_resolver();
    let second = new_resolver();
    let directory = CountingDirectory::new();

    first
        .role_arn_with(MultitenancyRole::Simple, &directory)
        .await
        .expect("first resolver should resolve");
    assert!(second.cache().is_empty());

    second
        .role_arn_with(MultitenancyRole::Simple, &directory)
        .await
        .expect("second resolver should resolve");
    assert_eq!(directory.lookups("CAPAMultiTenancySimple"), 2);
}
