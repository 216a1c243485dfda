//! Blob metadata and upload integration tests.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use bytes::Bytes;
    use futures::stream;
    use nimbus_client::{MockResponse, MockTransport};
    use nimbus_core::ByteStream;
    use nimbus_storage_client::StorageRequest;
    use nimbus_storage_model::input::GetBlobPropertiesInput;

    use crate::{storage_client, test_container_name};

    #[tokio::test]
    async fn test_should_resolve_properties_once_across_accessors() {
        let transport = MockTransport::new();
        transport.enqueue(MockResponse::ok(
            r#"{"properties":{"key":"report.pdf","size":2048,"etag":"\"e7\"","contentType":"application/pdf"}}"#,
        ));

        let client = storage_client(&transport, true);
        let response = client.get_blob_properties(GetBlobPropertiesInput {
            container: test_container_name("props"),
            key: "report.pdf".to_owned(),
        });

        // Dispatch is lazy; nothing has hit the wire yet.
        assert_eq!(transport.call_count(), 0);

        let size = response
            .map_output(|out| out.properties.size)
            .await
            .unwrap();
        let etag = response
            .map_output(|out| out.properties.etag.clone())
            .await
            .unwrap();
        assert_eq!(size, 2048);
        assert_eq!(etag, "\"e7\"");
        // Two accessors, one network read.
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_should_upload_file_backed_stream() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"payload from disk").unwrap();

        let transport = MockTransport::new();
        transport.enqueue(MockResponse::ok(r#"{"etag":"\"put-9\"","versionId":"v1"}"#));

        let client = storage_client(&transport, true);
        let body = ByteStream::from_path(file.path()).await.unwrap();
        assert_eq!(body.known_length(), Some(17));

        let response = client
            .put_blob_from_stream(test_container_name("upload"), "from-disk.bin", body)
            .await
            .unwrap();
        let output = response.output().await.unwrap();
        assert_eq!(output.etag, "\"put-9\"");
        assert_eq!(output.version_id.as_deref(), Some("v1"));

        let requests = transport.requests();
        let StorageRequest::PutBlob(input) = &requests[0] else {
            panic!("expected a PutBlob request");
        };
        assert_eq!(&input.body.data[..], b"payload from disk");
    }

    #[tokio::test]
    async fn test_should_upload_generator_stream_preserving_concatenation() {
        let transport = MockTransport::new();
        transport.enqueue(MockResponse::ok(r#"{"etag":"\"put-2\""}"#));

        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"Hello")),
            Ok(Bytes::from_static(b" ")),
            Ok(Bytes::from_static(b"")),
            Ok(Bytes::from_static(b"world")),
        ]);
        let client = storage_client(&transport, true);
        let response = client
            .put_blob_from_stream(
                test_container_name("gen"),
                "greeting.txt",
                ByteStream::from_stream(chunks),
            )
            .await
            .unwrap();
        response.output().await.unwrap();

        let requests = transport.requests();
        let StorageRequest::PutBlob(input) = &requests[0] else {
            panic!("expected a PutBlob request");
        };
        assert_eq!(&input.body.data[..], b"Hello world");
    }
}
