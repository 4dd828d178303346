//! Aggregation of several flat arguments into one request record.
//!
//! [`create_args_for_complex_type`] registers one flag per record property
//! and a [`ComplexArgumentProcessor`] that, after parsing, gathers those
//! flags into the record and stores it under a destination field.

use sql_models::{ComplexType, ModelObject, Properties};

use crate::arguments::ArgSettings;
use crate::error::Result;
use crate::namespace::Namespace;
use crate::registry::ArgumentContext;

/// One record property exposed as a flag.
///
/// `key` is the namespace field (and flag) name; it differs from `property`
/// when the property name is already taken by another argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexArg {
    pub property: &'static str,
    pub key: &'static str,
}

impl ComplexArg {
    /// A property exposed under a different key.
    pub const fn renamed(property: &'static str, key: &'static str) -> Self {
        Self { property, key }
    }
}

impl From<&'static str> for ComplexArg {
    fn from(property: &'static str) -> Self {
        Self {
            property,
            key: property,
        }
    }
}

impl From<(&'static str, &'static str)> for ComplexArg {
    fn from((property, key): (&'static str, &'static str)) -> Self {
        Self { property, key }
    }
}

type BuildFn = fn(Properties) -> sql_models::Result<ModelObject>;

fn build_object<T: ComplexType>(props: Properties) -> sql_models::Result<ModelObject> {
    ModelObject::new(T::build(props)?)
}

/// Post-parse step that assembles one record from namespace fields.
#[derive(Debug, Clone)]
pub struct ComplexArgumentProcessor {
    dest: String,
    type_name: &'static str,
    /// Namespace key to record property, in declaration order.
    model_properties: Vec<(&'static str, &'static str)>,
    build: BuildFn,
}

impl ComplexArgumentProcessor {
    pub fn new<T: ComplexType>(dest: &str, args: &[ComplexArg]) -> Self {
        Self {
            dest: dest.to_string(),
            type_name: T::TYPE_NAME,
            model_properties: args.iter().map(|a| (a.key, a.property)).collect(),
            build: build_object::<T>,
        }
    }

    pub fn dest(&self) -> &str {
        &self.dest
    }

    /// Namespace keys this processor reads and removes.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.model_properties.iter().map(|(key, _)| *key)
    }

    pub fn consumes(&self, key: &str) -> bool {
        self.keys().any(|k| k == key)
    }

    /// Build the record if any of its fields was specified, then remove
    /// every field that was scanned.
    pub fn process(&self, namespace: &mut Namespace) -> Result<()> {
        let matched: Vec<(&'static str, &'static str)> = self
            .model_properties
            .iter()
            .copied()
            .filter(|(key, _)| namespace.contains(key))
            .collect();

        if matched
            .iter()
            .any(|(key, _)| namespace.value(key).is_specified())
        {
            let mut props = Properties::new(self.type_name);
            for (key, property) in &matched {
                let value = namespace.value(key);
                if !value.is_null() {
                    props.insert(*property, value.clone());
                }
            }

            tracing::debug!("building {:?} with values {:?}", self.dest, props);
            let object = (self.build)(props)?;
            namespace.set(self.dest.clone(), object);
        } else {
            tracing::debug!(
                "not building {:?} because none of {:?} were specified",
                self.dest,
                matched.iter().map(|(key, _)| *key).collect::<Vec<_>>()
            );
        }

        for (key, _) in matched {
            tracing::debug!("deleting key {:?}", key);
            namespace.remove(key);
        }
        Ok(())
    }
}

/// Register one flag per property of `T` and, when `dest` is not empty, a
/// processor that combines them into a `T` stored under `dest`.
///
/// Each flag is `--` plus its key with underscores turned into dashes. Its
/// requiredness and help come from the property declaration of `T`. The
/// `dest` field itself is hidden from the command line.
pub fn create_args_for_complex_type<T, A>(
    c: &mut ArgumentContext,
    dest: &str,
    arguments: &[A],
    arg_group: Option<&str>,
) where
    T: ComplexType,
    A: Clone + Into<ComplexArg>,
{
    let arguments: Vec<ComplexArg> = arguments.iter().cloned().map(Into::into).collect();

    for arg in &arguments {
        let spec = T::property(arg.property);
        let mut settings = ArgSettings::new()
            .required(spec.is_some_and(|p| p.required))
            .options(&[format!("--{}", arg.key.replace('_', "-"))]);
        if let Some(help) = spec.and_then(|p| p.help) {
            settings = settings.help(help);
        }
        if let Some(group) = arg_group {
            settings = settings.group(group);
        }
        c.extra(arg.key, settings);
    }

    if !dest.is_empty() {
        c.extra(dest, ArgSettings::ignored());
        c.processor(ComplexArgumentProcessor::new::<T>(dest, &arguments));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_models::{Database, JobStepOutput, Sku, Value};

    fn sku_processor() -> ComplexArgumentProcessor {
        let args: Vec<ComplexArg> = ["capacity", "family", "name", "tier"]
            .into_iter()
            .map(Into::into)
            .collect();
        ComplexArgumentProcessor::new::<Sku>("sku", &args)
    }

    #[test]
    fn test_partial_input_builds_record() {
        let mut ns: Namespace = [
            ("capacity", Value::from("2")),
            ("family", Value::Null),
            ("name", Value::Null),
            ("tier", Value::from("GeneralPurpose")),
            ("sku", Value::Null),
        ]
        .into_iter()
        .collect();

        sku_processor().process(&mut ns).unwrap();

        let sku: Sku = ns.model("sku").unwrap();
        assert_eq!(sku.capacity, Some(2));
        assert_eq!(sku.tier.as_deref(), Some("GeneralPurpose"));
        assert_eq!(sku.family, None);
        assert_eq!(sku.name, None);
        for key in ["capacity", "family", "name", "tier"] {
            assert!(!ns.contains(key), "{key} should be removed");
        }
    }

    #[test]
    fn test_nothing_specified_leaves_dest_unset() {
        let mut ns: Namespace = [
            ("capacity", Value::Null),
            ("family", Value::from("")),
            ("sku", Value::Null),
        ]
        .into_iter()
        .collect();

        sku_processor().process(&mut ns).unwrap();

        assert!(ns.value("sku").is_null());
        assert!(!ns.contains("capacity"));
        assert!(!ns.contains("family"));
        assert_eq!(ns.keys().collect::<Vec<_>>(), vec!["sku"]);
    }

    // An explicit `false` or `0` reads the same as an omitted flag, so a
    // group holding only such values builds nothing. Whether those values
    // should count as given is still open.
    #[test]
    fn test_only_falsy_values_leave_dest_unset() {
        let args: Vec<ComplexArg> = vec!["zone_redundant".into(), "max_size_bytes".into()];
        let processor =
            ComplexArgumentProcessor::new::<sql_models::ElasticPool>("parameters", &args);

        let mut ns: Namespace = [
            ("zone_redundant", Value::Bool(false)),
            ("max_size_bytes", Value::Int(0)),
            ("parameters", Value::Null),
        ]
        .into_iter()
        .collect();

        processor.process(&mut ns).unwrap();

        assert!(ns.value("parameters").is_null());
        assert!(!ns.contains("zone_redundant"));
        assert!(!ns.contains("max_size_bytes"));
    }

    #[test]
    fn test_falsy_values_pass_through_once_built() {
        let args: Vec<ComplexArg> = vec!["zone_redundant".into(), "license_type".into()];
        let processor =
            ComplexArgumentProcessor::new::<sql_models::ElasticPool>("parameters", &args);

        let mut ns = Namespace::new();
        ns.set("zone_redundant", false);
        ns.set("license_type", "BasePrice");
        processor.process(&mut ns).unwrap();

        let pool: sql_models::ElasticPool = ns.model("parameters").unwrap();
        assert_eq!(pool.zone_redundant, Some(false));
    }

    #[test]
    fn test_renamed_key_lands_on_property() {
        let args = vec![
            ComplexArg::renamed("server_name", "output_server_name"),
            "database_name".into(),
            "table_name".into(),
        ];
        let processor = ComplexArgumentProcessor::new::<JobStepOutput>("output", &args);

        let mut ns = Namespace::new();
        ns.set("server_name", "jobsrv");
        ns.set("output_server_name", "outsrv");
        ns.set("database_name", "outdb");

        processor.process(&mut ns).unwrap();

        let output: JobStepOutput = ns.model("output").unwrap();
        assert_eq!(output.server_name.as_deref(), Some("outsrv"));
        assert_eq!(output.database_name.as_deref(), Some("outdb"));
        assert_eq!(ns.str("server_name"), Some("jobsrv"));
        assert!(!ns.contains("output_server_name"));
    }

    #[test]
    fn test_nested_record_is_consumed() {
        let args: Vec<ComplexArg> = vec!["collation".into(), "sku".into()];
        let processor = ComplexArgumentProcessor::new::<Database>("parameters", &args);
        assert!(processor.consumes("sku"));
        assert!(!processor.consumes("parameters"));

        let mut ns = Namespace::new();
        ns.set("sku", ModelObject::new(Sku { name: Some("S0".into()), ..Sku::default() }).unwrap());
        processor.process(&mut ns).unwrap();

        let db: Database = ns.model("parameters").unwrap();
        assert_eq!(db.sku.and_then(|s| s.name).as_deref(), Some("S0"));
        assert!(!ns.contains("sku"));
    }
}
