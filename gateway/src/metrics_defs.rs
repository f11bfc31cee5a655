use shared::metrics_defs::{MetricDef, MetricType};

pub const REQUEST_DURATION: MetricDef = MetricDef {
    name: "request.duration",
    metric_type: MetricType::Histogram,
    description: "Request duration in seconds. Tagged with status.",
};

pub const REQUESTS_INFLIGHT: MetricDef = MetricDef {
    name: "requests.inflight",
    metric_type: MetricType::Gauge,
    description: "Number of requests currently being processed",
};

pub const REDIRECTS_ISSUED: MetricDef = MetricDef {
    name: "redirect.issued",
    metric_type: MetricType::Counter,
    description: "Signed redirects sent to the image service. Tagged with selector.",
};

pub const PROVIDER_ERRORS: MetricDef = MetricDef {
    name: "provider.errors",
    metric_type: MetricType::Counter,
    description: "Catalog lookups that failed for reasons other than a missing image",
};

pub const ALL_METRICS: &[MetricDef] = &[
    REQUEST_DURATION,
    REQUESTS_INFLIGHT,
    REDIRECTS_ISSUED,
    PROVIDER_ERRORS,
];
