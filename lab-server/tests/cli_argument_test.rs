use clap::Parser;
use lab_common::SecurityLevel;
use lab_server::Cli;
use proptest::prelude::*;

fn arb_security_level() -> impl Strategy<Value = SecurityLevel> {
    prop::sample::select(SecurityLevel::ALL.to_vec())
}

// Locale tags: lowercase letters, optional region suffix
fn arb_locale() -> impl Strategy<Value = String> {
    "[a-z]{2}(_[A-Z]{2})?"
}

proptest! {
    /// Any valid port given via `--http-port` ends up in the loaded config
    #[test]
    fn prop_http_port_override(port in 1u16..=u16::MAX) {
        let port_arg = port.to_string();
        let cli = Cli::try_parse_from(["vulnlab", "--http-port", port_arg.as_str()]);
        prop_assert!(cli.is_ok());

        let config = cli.unwrap().load_config().unwrap();
        prop_assert_eq!(config.http_port, port);
        prop_assert_eq!(config.ping.count, 4);
    }

    /// Every security level name parses and becomes the default level
    #[test]
    fn prop_security_level_override(level in arb_security_level()) {
        let cli = Cli::try_parse_from(["vulnlab", "--security", level.as_str()]).unwrap();
        prop_assert_eq!(cli.security, Some(level));
        prop_assert_eq!(cli.load_config().unwrap().default_security, level);
    }

    /// Names outside the four levels are refused at parse time
    #[test]
    fn prop_unknown_security_level_rejected(name in "[a-z]{1,12}") {
        prop_assume!(name.parse::<SecurityLevel>().is_err());
        prop_assert!(Cli::try_parse_from(["vulnlab", "--security", name.as_str()]).is_err());
    }

    #[test]
    fn prop_locale_and_ping_overrides(locale in arb_locale(), count in 1u32..20, timeout in 1u64..120) {
        let count_arg = count.to_string();
        let timeout_arg = timeout.to_string();
        let cli = Cli::try_parse_from([
            "vulnlab",
            "--default-locale", locale.as_str(),
            "--ping-count", count_arg.as_str(),
            "--ping-timeout", timeout_arg.as_str(),
        ]).unwrap();

        let config = cli.load_config().unwrap();
        prop_assert_eq!(config.default_locale, locale);
        prop_assert_eq!(config.ping.count, count);
        prop_assert_eq!(config.ping.timeout_secs, timeout);
    }
}

#[test]
fn test_port_zero_parses_but_fails_validation() {
    let cli = Cli::try_parse_from(["vulnlab", "--http-port", "0"]).unwrap();
    assert!(cli.load_config().is_err());
}

#[test]
fn test_negative_port_is_rejected() {
    assert!(Cli::try_parse_from(["vulnlab", "--http-port", "-1"]).is_err());
}
