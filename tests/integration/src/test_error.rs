//! Failure-semantics integration tests.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::{StreamExt, TryStreamExt};
    use http::StatusCode;
    use nimbus_client::{MockResponse, MockTransport};
    use nimbus_core::NimbusError;
    use nimbus_storage_model::ErrorDocument;
    use nimbus_storage_model::input::{GetBlobPropertiesInput, ListBlobsInput};

    use crate::{list_page, storage_client, test_container_name};

    fn list_input(container: &str) -> ListBlobsInput {
        ListBlobsInput {
            container: container.to_owned(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_should_re_raise_stored_protocol_error_without_retry() {
        let transport = MockTransport::new();
        transport.enqueue(MockResponse::status(
            StatusCode::FORBIDDEN,
            r#"{"code":"AccessDenied","message":"signature mismatch"}"#,
        ));

        let client = storage_client(&transport, true);
        let response = client.get_blob_properties(GetBlobPropertiesInput {
            container: test_container_name("denied"),
            key: "secret.txt".to_owned(),
        });

        let first = response.output().await.unwrap_err();
        let second = response.output().await.unwrap_err();
        assert_eq!(first.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(transport.call_count(), 1);

        let doc = first
            .raw_body()
            .and_then(|body| ErrorDocument::decode(body))
            .unwrap();
        assert_eq!(doc.code, "AccessDenied");
    }

    #[tokio::test]
    async fn test_should_preserve_items_consumed_before_a_page_fails() {
        let transport = MockTransport::new();
        transport.enqueue(list_page(&["a", "b"], Some("tok1")));
        transport.enqueue(MockResponse::status(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"code":"SlowDown"}"#,
        ));

        let listing = storage_client(&transport, true)
            .list_blobs(list_input(&test_container_name("partial")));
        let mut items = listing.items();

        let mut consumed = Vec::new();
        let error = loop {
            match items.next().await {
                Some(Ok(blob)) => consumed.push(blob.key),
                Some(Err(err)) => break err,
                None => panic!("listing ended without surfacing the page failure"),
            }
        };

        // Page 1's items stay valid; the failure surfaces exactly once,
        // then the stream ends.
        assert_eq!(consumed, ["a", "b"]);
        assert_eq!(error.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert!(items.next().await.is_none());
    }

    #[tokio::test]
    async fn test_should_not_raise_for_failed_page_the_caller_never_reaches() {
        let transport = MockTransport::new();
        transport.enqueue(list_page(&["a", "b"], Some("tok1")));
        transport.enqueue_error(NimbusError::transport("connection reset"));

        let listing = storage_client(&transport, true)
            .list_blobs(list_input(&test_container_name("early")));
        let consumed: Vec<String> = listing
            .items()
            .take(2)
            .map_ok(|blob| blob.key)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(consumed, ["a", "b"]);

        // The prefetched page 2 failed in the background; abandoning the
        // listing must swallow that outcome.
        drop(listing);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_should_surface_transport_failure_on_first_page() {
        let transport = MockTransport::new();
        transport.enqueue_error(NimbusError::transport("dns lookup failed"));

        let listing = storage_client(&transport, false)
            .list_blobs(list_input(&test_container_name("dns")));
        let err = listing
            .items()
            .try_collect::<Vec<_>>()
            .await
            .unwrap_err();
        assert!(matches!(err, NimbusError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_should_map_undecodable_success_body_to_parse_error() {
        let transport = MockTransport::new();
        transport.enqueue(MockResponse::ok("<html>not json</html>"));

        let listing = storage_client(&transport, false)
            .list_blobs(list_input(&test_container_name("html")));
        let err = listing.page().await.unwrap_err();
        assert!(matches!(err, NimbusError::Parse { .. }));
    }
}
