// Built-in rule tables.
//
// These are the baseline every RuleSet starts from. Caller additions are
// appended after them and never replace them.

/// Literal name prefixes that mark runtime or bookkeeping state (case-sensitive).
pub const DEFAULT_EXCLUDE_PREFIXES: &[&str] = &[
    // session/runtime churn
    "browser.sessionstore.",
    "browser.startup.",
    // UI / engagement bookkeeping
    "browser.engagement.",
    "browser.migration.",
    "browser.protections_panel.",
    "browser.termsofuse.",
    "devtools.",
    // remote settings / region / connectivity bookkeeping
    "services.settings.",
    "browser.region.",
    "network.captive-portal-service.",
    "network.connectivity-service.",
    "browser.safebrowsing.provider.",
    // distro/policy bookkeeping
    "browser.policies.",
    "distribution.",
    // extension churn
    "extensions.getAddons.",
    "extensions.systemAddonSet", // JSON blob state
    // telemetry/reporting caches
    "toolkit.telemetry.cached",
    "datareporting.dau.cached",
    // experiments/rollouts
    "nimbus.",
    // push identifiers/state
    "dom.push.",
    // per-profile extension UUID map
    "extensions.webextensions.uuids",
    // font fingerprinting surface
    "font.",
];

/// Substrings matched case-insensitively anywhere in the name.
pub const DEFAULT_EXCLUDE_SUBSTRINGS: &[&str] = &[
    // identifiers / per-profile markers
    "impressionid",
    "storeid",
    "profileid",
    "clientid",
    "userid",
    "pushid",
    "installationid",
    "instanceid",
    "deviceid",
    "machineid",
    "guid",
    "uuid",
    // time / state / counters / history
    "last",
    "next",
    "date",
    "time",
    "seconds",
    "count",
    "counter",
    "etag",
    "skew",
    "pending",
    "qualified",
    // migration/UX bookkeeping
    "migrat",
    "version",
    "schema",
    "checkpoint",
    "has-used",
    "ever",
    "seen",
    "shown",
    "mostrecent",
    "applied",
    "processed",
    // known state blobs / revealing prefs
    "persistedactions",
    "uicustomization",
    "resultgroups",
    "quarantineddomains",
    "tempdirsuffix",
    "blacklist.",
    "failureid",
    "hashvalue",
    "buildid",
];

/// Hard denylist. A hit here can never be overridden by the allowlist.
pub const DEFAULT_EXCLUDE_REGEXES: &[&str] = &[
    r"^extensions\.webextensions\.uuids$",
    r"^privacy\.purge_trackers\.(last_purge|date_in_cookie_database)$",
    r"^privacy\.sanitize\.pending$",
    r"^browser\.search\.totalSearches$",
    r"^browser\.pageActions\.persistedActions$",
    r"^browser\.uiCustomization\.state$",
    r"^browser\.urlbar\.resultGroups$",
    r"^extensions\.quarantinedDomains\.list$",
    r"^security\.sandbox\.content\.tempDirSuffix$",
    r"^gfx\.blacklist\.",
    r"^media\.gmp-",
    r"^print\.printer_",
    r"^print\.printer\.",
    r"^print_printer$",
];

/// Deliberate policy settings. Kept tight; broad namespaces are split up.
pub const DEFAULT_INCLUDE_REGEXES: &[&str] = &[
    // user-intent policy
    r"^media\.eme\.enabled$",
    r"^browser\.bookmarks\.autoExportHTML$",
    r"^browser\.bookmarks\.file$",
    // privacy / security posture
    r"^beacon\.enabled$",
    r"^network\.trr\.",
    r"^network\.dns\.",
    r"^browser\.contentblocking\.",
    r"^privacy\.trackingprotection\.",
    r"^privacy\.globalprivacycontrol\.(enabled|pbmode)$",
    r"^privacy\.resistFingerprinting$",
    r"^privacy\.partition\.",
    r"^privacy\.firstparty\.isolate$",
    r"^privacy\.query_stripping\.",
    r"^privacy\.userContext\.",
    // autofill policy
    r"^dom\.forms\.autocomplete\.formautofill$",
    // telemetry policy (not cached IDs)
    r"^toolkit\.telemetry\.(enabled|unified|server)$",
    r"^toolkit\.telemetry\.archive\.enabled$",
    r"^toolkit\.telemetry\.reportingpolicy\.",
    r"^datareporting\.healthreport\.",
    r"^datareporting\.policy\.",
    // safebrowsing policy toggles
    r"^browser\.safebrowsing\.(downloads\.remote\.enabled|downloads\.remote\.url|malware\.enabled|phishing\.enabled)$",
    // security policy subsets (no blanket ^security\.)
    r"^security\.(tls\.|ssl\.|ocsp\.)",
    r"^dom\.security\.",
];
