pub fn parse_host(host: &str, default_port: u16) -> anyhow::Result<(&str, u16)> {
    if let Some((host, port)) = host.rsplit_once(":") {
        let port: u16 = port.parse()?;
        Ok((host, port))
    } else {
        Ok((host, default_port))
    }
}

/// Splits a comma separated list of e-mail addresses.
///
/// Surrounding whitespace is trimmed and empty entries are dropped, so `"a@x.com, ,b@x.com"`
/// yields two addresses.
pub fn split_addresses(addresses: &str) -> Vec<String> {
    addresses
        .split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_host_with_port() {
        let (host, port) = parse_host("mail.example.com:587", 25).unwrap();
        assert_eq!(host, "mail.example.com");
        assert_eq!(port, 587);
    }

    #[test]
    fn parse_host_default_port() {
        let (host, port) = parse_host("mail.example.com", 25).unwrap();
        assert_eq!(host, "mail.example.com");
        assert_eq!(port, 25);
    }

    #[test]
    fn parse_host_invalid_port() {
        assert!(parse_host("mail.example.com:smtp", 25).is_err());
    }

    #[test]
    fn split_addresses_trims_and_drops_empty() {
        assert_eq!(split_addresses("a@x.com, b@x.com,,  "), vec!["a@x.com", "b@x.com"]);
        assert!(split_addresses("").is_empty());
    }
}
