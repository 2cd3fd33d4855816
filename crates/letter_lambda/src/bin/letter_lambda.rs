use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_s3::primitives::ByteStream;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use letter_lambda::adapters::fragment_store::FragmentStore;
use letter_lambda::adapters::object_store::{LetterStore, LetterWrite, ServerSideEncryption};
use letter_lambda::config::LetterServiceConfig;
use letter_lambda::handlers::api::handle_letter_event;
use letter_lambda::handlers::compose::ComposeConfig;
use letter_lambda::logging::log_info;
use letter_lambda::runtime::contract::LetterResponse;
use letter_lambda::runtime::fragment::{Fragment, FragmentStoreError};
use letter_lambda::runtime::storage_keys::{FragmentKey, FRAGMENT_ATTRIBUTE, RECORD_KEY_ATTRIBUTE};
use serde_json::{json, Value};

const SHA256_METADATA_KEY: &str = "letter-sha256";

struct DynamoFragmentStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl FragmentStore for DynamoFragmentStore {
    fn lookup(&self, key: &FragmentKey) -> Result<Option<Fragment>, FragmentStoreError> {
        let table_name = self.table_name.clone();
        let record_key = key.record_key();
        let client = self.dynamodb_client.clone();

        let item = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .get_item()
                    .table_name(table_name)
                    .key(RECORD_KEY_ATTRIBUTE, AttributeValue::S(record_key))
                    .send()
                    .await
                    .map(|output| output.item)
                    .map_err(|error| format!("failed to read fragment from dynamodb: {error}"))
            })
        })
        .map_err(|message| FragmentStoreError::unavailable(key, message))?;

        match item {
            Some(item) => fragment_from_item(key, &item).map(Some),
            None => Ok(None),
        }
    }
}

fn fragment_from_item(
    key: &FragmentKey,
    item: &HashMap<String, AttributeValue>,
) -> Result<Fragment, FragmentStoreError> {
    let value = item.get(FRAGMENT_ATTRIBUTE).ok_or_else(|| {
        FragmentStoreError::malformed(key, format!("record has no '{FRAGMENT_ATTRIBUTE}' attribute"))
    })?;

    value
        .as_s()
        .map(|text| Fragment::new(text.clone()))
        .map_err(|_| {
            FragmentStoreError::malformed(
                key,
                format!("'{FRAGMENT_ATTRIBUTE}' attribute is not a string"),
            )
        })
}

struct S3LetterStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl LetterStore for S3LetterStore {
    fn put_letter(&self, write: &LetterWrite) -> Result<(), String> {
        let bucket = self.bucket.clone();
        let object_key = write.key().to_string();
        let body_bytes = write.body().to_vec();
        let content_type = write.content_type();
        let digest = write.sha256_hex().to_string();
        let encryption = s3_encryption(write.encryption());
        let kms_key_id = write.encryption().kms_key_id().map(str::to_string);
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .body(ByteStream::from(body_bytes))
                    .content_type(content_type)
                    .server_side_encryption(encryption)
                    .set_ssekms_key_id(kms_key_id)
                    .metadata(SHA256_METADATA_KEY, digest)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to write letter to s3: {error}"))
            })
        })
    }
}

fn s3_encryption(encryption: &ServerSideEncryption) -> aws_sdk_s3::types::ServerSideEncryption {
    match encryption {
        ServerSideEncryption::Aes256 => aws_sdk_s3::types::ServerSideEncryption::Aes256,
        ServerSideEncryption::AwsKms { .. } => aws_sdk_s3::types::ServerSideEncryption::AwsKms,
    }
}

struct RuntimeDependencies {
    compose_config: ComposeConfig,
    fragments: DynamoFragmentStore,
    letters: S3LetterStore,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<LetterResponse, Error> {
    Ok(handle_letter_event(
        &event.payload,
        &deps.compose_config,
        &deps.fragments,
        &deps.letters,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = LetterServiceConfig::from_env().map_err(|error| Error::from(error.to_string()))?;

    let timeout_config = aws_config::timeout::TimeoutConfig::builder()
        .operation_timeout(config.store_timeout)
        .build();
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .timeout_config(timeout_config)
        .load()
        .await;

    log_info(
        "letter_runtime",
        "runtime_initialized",
        json!({
            "table_name": config.table_name.clone(),
            "bucket": config.bucket.clone(),
            "encryption": config.encryption.as_str(),
            "store_timeout_ms": config.store_timeout.as_millis(),
        }),
    );

    let deps = RuntimeDependencies {
        compose_config: config.compose_config(),
        fragments: DynamoFragmentStore {
            table_name: config.table_name.clone(),
            dynamodb_client: aws_sdk_dynamodb::Client::new(&aws_config),
        },
        letters: S3LetterStore {
            bucket: config.bucket.clone(),
            s3_client: aws_sdk_s3::Client::new(&aws_config),
        },
    };
    let deps = &deps;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: Vec<(&str, AttributeValue)>) -> HashMap<String, AttributeValue> {
        pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn reads_fragment_text_verbatim() {
        let key = FragmentKey::customer("UnitTestCust");
        let record = item(vec![
            (RECORD_KEY_ATTRIBUTE, AttributeValue::S("C#UnitTestCust".to_string())),
            (FRAGMENT_ATTRIBUTE, AttributeValue::S(" Unit Test Customer ".to_string())),
        ]);

        let fragment = fragment_from_item(&key, &record).expect("record should decode");
        assert_eq!(fragment.as_str(), " Unit Test Customer ");
    }

    #[test]
    fn record_without_data_is_malformed_not_absent() {
        let key = FragmentKey::document("UnitTestDoc");
        let record = item(vec![(
            RECORD_KEY_ATTRIBUTE,
            AttributeValue::S("D#UnitTestDoc".to_string()),
        )]);

        let error = fragment_from_item(&key, &record).expect_err("record should be rejected");
        assert!(!error.is_unavailable());
        assert!(error.to_string().contains("has no 'data' attribute"));
    }

    #[test]
    fn non_string_data_is_malformed() {
        let key = FragmentKey::document("UnitTestDoc");
        let record = item(vec![(FRAGMENT_ATTRIBUTE, AttributeValue::N("7".to_string()))]);

        let error = fragment_from_item(&key, &record).expect_err("record should be rejected");
        assert!(error.to_string().contains("is not a string"));
    }

    #[test]
    fn maps_encryption_to_s3_header_values() {
        assert_eq!(
            s3_encryption(&ServerSideEncryption::Aes256),
            aws_sdk_s3::types::ServerSideEncryption::Aes256
        );
        assert_eq!(
            s3_encryption(&ServerSideEncryption::AwsKms { key_id: None }),
            aws_sdk_s3::types::ServerSideEncryption::AwsKms
        );
    }
}
