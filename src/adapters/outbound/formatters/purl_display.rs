use packageurl::PackageUrl;
use std::str::FromStr;

/// Short human form of package URLs
///
/// `pkg:rpm/redhat/curl@7.76.1?arch=x86_64` renders as
/// `REDHAT curl-7.76.1,x86_64,RPM`; purls without a namespace are
/// `UPSTREAM`. Unparseable strings are shown unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurlDisplay {
    show_purl: bool,
}

impl PurlDisplay {
    /// # Arguments
    /// * `show_purl` - Print purls verbatim instead of the short form
    pub fn new(show_purl: bool) -> Self {
        Self { show_purl }
    }

    pub fn component(&self, purl: &str) -> String {
        if self.show_purl {
            return purl.to_string();
        }
        match PackageUrl::from_str(purl) {
            Ok(parsed) => {
                let mut parts = vec![format!(
                    "{} {}",
                    Self::namespace_label(&parsed),
                    Self::name_version(&parsed)
                )];
                if let Some(arch) = parsed.qualifiers().get("arch") {
                    parts.push(arch.to_string());
                }
                parts.push(parsed.ty().to_uppercase());
                parts.join(",")
            }
            Err(err) => {
                log::debug!("Not a package URL '{}': {}", purl, err);
                purl.to_string()
            }
        }
    }

    /// `name-version` only, used for source components
    pub fn name_version_of(&self, purl: &str) -> String {
        if self.show_purl {
            return purl.to_string();
        }
        PackageUrl::from_str(purl)
            .map(|parsed| Self::name_version(&parsed))
            .unwrap_or_else(|_| purl.to_string())
    }

    /// `REDHAT`, `UPSTREAM`, ... for a purl
    pub fn namespace_of(purl: &str) -> String {
        PackageUrl::from_str(purl)
            .map(|parsed| Self::namespace_label(&parsed))
            .unwrap_or_else(|_| "UPSTREAM".to_string())
    }

    fn namespace_label(purl: &PackageUrl<'_>) -> String {
        purl.namespace()
            .map(str::to_uppercase)
            .unwrap_or_else(|| "UPSTREAM".to_string())
    }

    fn name_version(purl: &PackageUrl<'_>) -> String {
        match purl.version() {
            Some(version) => format!("{}-{}", purl.name(), version),
            None => purl.name().to_string(),
        }
    }
}
