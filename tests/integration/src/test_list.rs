//! Auto-pagination integration tests.

#[cfg(test)]
mod tests {
    use futures::{StreamExt, TryStreamExt};
    use nimbus_client::MockTransport;
    use nimbus_storage_client::StorageRequest;
    use nimbus_storage_model::input::ListBlobsInput;

    use crate::{list_page, storage_client, test_container_name};

    fn list_input(container: &str) -> ListBlobsInput {
        ListBlobsInput {
            container: container.to_owned(),
            ..Default::default()
        }
    }

    async fn collect_keys(prefetch: bool) -> (Vec<String>, usize) {
        let transport = MockTransport::new();
        transport.enqueue(list_page(&["a", "b"], Some("tok1")));
        transport.enqueue(list_page(&[], Some("tok2")));
        transport.enqueue(list_page(&["c", "d", "e"], None));

        let container = test_container_name("list");
        let listing = storage_client(&transport, prefetch).list_blobs(list_input(&container));
        let keys: Vec<String> = listing
            .items()
            .map_ok(|blob| blob.key)
            .try_collect()
            .await
            .unwrap();
        (keys, transport.call_count())
    }

    #[tokio::test]
    async fn test_should_walk_three_pages_with_prefetch() {
        let (keys, calls) = collect_keys(true).await;
        assert_eq!(keys, ["a", "b", "c", "d", "e"]);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_should_walk_three_pages_without_prefetch() {
        let (keys, calls) = collect_keys(false).await;
        assert_eq!(keys, ["a", "b", "c", "d", "e"]);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_should_yield_empty_listing_across_empty_pages() {
        let transport = MockTransport::new();
        transport.enqueue(list_page(&[], Some("tok1")));
        transport.enqueue(list_page(&[], None));

        let listing =
            storage_client(&transport, true).list_blobs(list_input(&test_container_name("empty")));
        let keys: Vec<String> = listing
            .items()
            .map_ok(|blob| blob.key)
            .try_collect()
            .await
            .unwrap();
        assert!(keys.is_empty());
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_should_carry_listing_filters_into_follow_up_requests() {
        let transport = MockTransport::new();
        transport.enqueue(list_page(&["photos/1.jpg"], Some("tok1")));
        transport.enqueue(list_page(&["photos/2.jpg"], None));

        let container = test_container_name("filters");
        let input = ListBlobsInput {
            container: container.clone(),
            prefix: Some("photos/".to_owned()),
            max_results: Some(1),
            continuation_token: None,
        };
        let listing = storage_client(&transport, false).list_blobs(input);
        let _: Vec<_> = listing.items().try_collect().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        let StorageRequest::ListBlobs(follow_up) = &requests[1] else {
            panic!("expected a ListBlobs request");
        };
        assert_eq!(follow_up.container, container);
        assert_eq!(follow_up.prefix.as_deref(), Some("photos/"));
        assert_eq!(follow_up.max_results, Some(1));
        assert_eq!(follow_up.continuation_token.as_deref(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_should_read_single_page_without_walking_the_listing() {
        let transport = MockTransport::new();
        transport.enqueue(list_page(&["a", "b"], Some("tok1")));

        let listing =
            storage_client(&transport, false).list_blobs(list_input(&test_container_name("page")));
        let page = listing.page().await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.continuation_token.as_deref(), Some("tok1"));
        // Only this page was fetched.
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_should_restart_item_stream_from_first_page() {
        let transport = MockTransport::new();
        transport.enqueue(list_page(&["a"], Some("tok1")));
        transport.enqueue(list_page(&["b"], None));
        // The restarted walk reuses page 1's cached parse and refetches
        // page 2.
        transport.enqueue(list_page(&["b"], None));

        let listing =
            storage_client(&transport, false).list_blobs(list_input(&test_container_name("again")));
        let first: Vec<String> = listing
            .items()
            .map_ok(|blob| blob.key)
            .try_collect()
            .await
            .unwrap();
        let second: Vec<String> = listing
            .items()
            .map_ok(|blob| blob.key)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_should_stop_early_without_draining_the_listing() {
        let transport = MockTransport::new();
        transport.enqueue(list_page(&["a", "b", "c"], Some("tok1")));
        transport.enqueue(list_page(&["d"], None));

        let listing =
            storage_client(&transport, false).list_blobs(list_input(&test_container_name("early")));
        let mut items = listing.items();
        let first = items.next().await.unwrap().unwrap();
        assert_eq!(first.key, "a");
        drop(items);

        // Without prefetch, stopping inside page 1 never touched page 2.
        assert_eq!(transport.call_count(), 1);
        assert_eq!(transport.remaining(), 1);
    }
}
