use crate::client::{check, SupabaseClient};
use crate::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};

impl SupabaseClient {
    /// Upload `bytes` to `bucket/path`. Never overwrites: an existing object
    /// at the same path is reported as an API error.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let url = self.object_url("storage/v1/object", bucket, path);
        let resp = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;
        check(resp).await?;
        tracing::debug!(%bucket, %path, "object uploaded");
        Ok(())
    }

    /// Public URL of an object in a public bucket. Pure string assembly; the
    /// object need not exist.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.object_url("storage/v1/object/public", bucket, path)
    }

    /// `{prefix}/{bucket}/{path}` with the bucket and each path segment
    /// percent-encoded. Empty, `.` and `..` segments are dropped so an object
    /// path can never climb out of its bucket.
    fn object_url(&self, prefix: &str, bucket: &str, path: &str) -> String {
        let base = self.url(prefix);
        let Ok(mut url) = Url::parse(&base) else {
            return format!("{base}/{bucket}/{}", path.trim_start_matches('/'));
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(bucket)
                .extend(path.split('/').filter(|s| !matches!(*s, "" | "." | "..")));
        }
        url.into()
    }
}
