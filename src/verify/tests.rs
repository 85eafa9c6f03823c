use std::net::Ipv4Addr;

use super::Verifier;
use crate::input::dedup_addresses;
use crate::mx::tests::StubResolver;
use crate::mx::{DomainResolver, DomainStatus, LookupError, MxRecord};
use crate::smtp_verify::tests::{HostScript, ScriptedConnector, answering};
use crate::smtp_verify::{SmtpProbe, SmtpProbeOptions, SmtpStatus};

fn verifier<'a>(
    dns: &'a StubResolver,
    smtp: &'a ScriptedConnector,
) -> Verifier<&'a StubResolver, &'a ScriptedConnector> {
    Verifier::new(
        DomainResolver::new(dns),
        SmtpProbe::new(smtp, SmtpProbeOptions::default()),
    )
}

/// x.com routes to two exchangers, y.com has only an A record, gone.test is
/// NXDOMAIN, dark.test has neither MX nor A.
fn world() -> (StubResolver, ScriptedConnector) {
    let dns = StubResolver::new(
        |domain| match domain {
            "x.com" => Ok(vec![
                MxRecord::new(20, "mx2.x.com."),
                MxRecord::new(10, "mx1.x.com."),
            ]),
            "y.com" | "dark.test" => Err(LookupError::NoRecords),
            "gone.test" => Err(LookupError::NxDomain),
            _ => Err(LookupError::failed("SERVFAIL")),
        },
        |domain| match domain {
            "y.com" => Ok(vec![Ipv4Addr::new(192, 0, 2, 7)]),
            _ => Err(LookupError::NoRecords),
        },
    );
    let smtp = ScriptedConnector::new()
        .host("mx1.x.com", HostScript::Refused)
        .host("mx2.x.com", answering("250 2.1.5 Ok\r\n"))
        .host("y.com", answering("550 5.1.1 Unknown user\r\n"));
    (dns, smtp)
}

#[test]
fn invalid_format_does_no_network_work() {
    let (dns, smtp) = world();
    let mut v = verifier(&dns, &smtp);

    let result = v.verify("not-an-email");

    assert!(!result.format_valid());
    assert_eq!(result.input, "not-an-email");
    assert_eq!(result.domain.status, DomainStatus::NotFound);
    assert!(result.domain.hosts.is_empty());
    assert_eq!(result.smtp.status, SmtpStatus::Skipped);
    assert_eq!(result.smtp.code, 0);
    assert_eq!(dns.calls(), 0);
    assert_eq!(smtp.connect_count(), 0);
}

#[test]
fn valid_address_goes_through_fallback_host() {
    let (dns, smtp) = world();
    let mut v = verifier(&dns, &smtp);

    let result = v.verify("Alice@X.com");

    let address = result.address.as_ref().expect("valid format");
    assert_eq!(address.full(), "alice@x.com");
    assert_eq!(result.domain.hosts, vec!["mx1.x.com", "mx2.x.com"]);
    assert_eq!(result.smtp.status, SmtpStatus::UserExists);
    assert_eq!(result.smtp.host.as_deref(), Some("mx2.x.com"));
    assert_eq!(smtp.commands_to("mx2.x.com")[2], "RCPT TO:<alice@x.com>");
}

#[test]
fn a_record_domain_is_probed_directly() {
    let (dns, smtp) = world();
    let mut v = verifier(&dns, &smtp);

    let result = v.verify("bob@y.com");

    assert_eq!(result.domain.status, DomainStatus::Valid);
    assert_eq!(result.domain.hosts, vec!["y.com"]);
    assert_eq!(result.smtp.status, SmtpStatus::UserNotFound);
    assert_eq!(result.smtp.code, 550);
}

#[test]
fn unusable_domains_skip_smtp() {
    let (dns, smtp) = world();
    let mut v = verifier(&dns, &smtp);

    let gone = v.verify("a@gone.test");
    let dark = v.verify("a@dark.test");
    let broken = v.verify("a@servfail.test");

    assert_eq!(gone.domain.status, DomainStatus::NotFound);
    assert_eq!(dark.domain.status, DomainStatus::NoUsableRecord);
    assert_eq!(broken.domain.status, DomainStatus::NoUsableRecord);
    for result in [&gone, &dark, &broken] {
        assert!(result.format_valid());
        assert_eq!(result.smtp.status, SmtpStatus::Skipped);
        assert_eq!(result.smtp.code, 0);
    }
    assert_eq!(smtp.connect_count(), 0);
}

#[test]
fn each_domain_is_resolved_once_per_batch() {
    let (dns, smtp) = world();
    let mut v = verifier(&dns, &smtp);

    v.verify_all(["a@x.com", "b@x.com", "c@x.com", "d@gone.test", "e@gone.test"]);

    assert_eq!(dns.mx_calls.get(), 2);
    assert_eq!(v.resolver().cache().len(), 2);
}

#[test]
fn batch_keeps_deduplicated_input_order() {
    let (dns, smtp) = world();
    let mut v = verifier(&dns, &smtp);

    let batch = dedup_addresses(["A@x.com", "a@x.com", "b@y.com"]);
    let results = v.verify_all(&batch);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].input, "a@x.com");
    assert_eq!(results[1].input, "b@y.com");
}

#[test]
fn identical_runs_give_identical_output() {
    let batch = dedup_addresses([
        "a@x.com",
        "broken",
        "b@y.com",
        "c@gone.test",
        "d@dark.test",
    ]);

    let run = || {
        let (dns, smtp) = world();
        let mut v = verifier(&dns, &smtp);
        let results = v.verify_all(&batch);
        format!("{results:?}")
    };

    assert_eq!(run(), run());
}
