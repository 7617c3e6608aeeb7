//! The built-in core-library catalog.
//!
//! A hand-maintained slice of the framework's `System` namespace: the
//! types embedded expressions reach for constantly, with enough member
//! coverage for chained resolution (`DateTime.Now.Year`, `42.CompareTo`)
//! to work. Result types on members reference other types in this
//! catalog so chains keep binding.

use std::sync::Arc;

use super::assembly::AssemblyCatalog;

/// Assembly names the core catalog answers to.
pub const CORE_ASSEMBLY_NAMES: &[&str] = &["System.Runtime", "mscorlib", "System.Private.CoreLib"];

const OBJECT: &str = "System.Object";
const VALUE_TYPE: &str = "System.ValueType";
const BOOL: &str = "System.Boolean";
const CHAR: &str = "System.Char";
const STRING: &str = "System.String";
const INT32: &str = "System.Int32";
const INT64: &str = "System.Int64";
const DOUBLE: &str = "System.Double";
const DATE_TIME: &str = "System.DateTime";
const TIME_SPAN: &str = "System.TimeSpan";
const DAY_OF_WEEK: &str = "System.DayOfWeek";
const STRING_ARRAY: &str = "System.String[]";

/// Build the core catalog. Call once and share the `Arc`.
pub fn core_catalog() -> Arc<AssemblyCatalog> {
    let catalog = AssemblyCatalog::builder("System.Runtime")
        .ty("System", "Object", None, |t| {
            t.method("ToString", Some(STRING), "ToString()")
                .method("Equals", Some(BOOL), "Equals(object obj)")
                .static_method("Equals", Some(BOOL), "Equals(object a, object b)")
                .static_method(
                    "ReferenceEquals",
                    Some(BOOL),
                    "ReferenceEquals(object a, object b)",
                )
                .method("GetHashCode", Some(INT32), "GetHashCode()")
                .method("GetType", None, "GetType()");
        })
        .ty("System", "ValueType", Some(OBJECT), |t| {
            t.method("ToString", Some(STRING), "ToString()")
                .method("Equals", Some(BOOL), "Equals(object obj)")
                .method("GetHashCode", Some(INT32), "GetHashCode()");
        })
        .ty("System", "Boolean", Some(VALUE_TYPE), |t| {
            t.method("CompareTo", Some(INT32), "CompareTo(bool value)")
                .method("Equals", Some(BOOL), "Equals(bool obj)")
                .method("ToString", Some(STRING), "ToString()")
                .static_method("Parse", Some(BOOL), "Parse(string value)")
                .static_method("TryParse", Some(BOOL), "TryParse(string value, out bool result)")
                .static_field("TrueString", STRING)
                .static_field("FalseString", STRING);
        })
        .ty("System", "Char", Some(VALUE_TYPE), |t| {
            t.method("CompareTo", Some(INT32), "CompareTo(char value)")
                .method("Equals", Some(BOOL), "Equals(char obj)")
                .method("ToString", Some(STRING), "ToString()")
                .static_method("IsDigit", Some(BOOL), "IsDigit(char c)")
                .static_method("IsLetter", Some(BOOL), "IsLetter(char c)")
                .static_method("IsWhiteSpace", Some(BOOL), "IsWhiteSpace(char c)")
                .static_method("ToUpper", Some(CHAR), "ToUpper(char c)")
                .static_method("ToLower", Some(CHAR), "ToLower(char c)");
        })
        .ty("System", "String", Some(OBJECT), |t| {
            t.property("Length", INT32)
                .method("Substring", Some(STRING), "Substring(int startIndex)")
                .method(
                    "Substring",
                    Some(STRING),
                    "Substring(int startIndex, int length)",
                )
                .method("IndexOf", Some(INT32), "IndexOf(string value)")
                .method("IndexOf", Some(INT32), "IndexOf(char value)")
                .method("Contains", Some(BOOL), "Contains(string value)")
                .method("StartsWith", Some(BOOL), "StartsWith(string value)")
                .method("EndsWith", Some(BOOL), "EndsWith(string value)")
                .method("ToUpper", Some(STRING), "ToUpper()")
                .method("ToLower", Some(STRING), "ToLower()")
                .method("Trim", Some(STRING), "Trim()")
                .method("Replace", Some(STRING), "Replace(string oldValue, string newValue)")
                .method("Split", Some(STRING_ARRAY), "Split(char separator)")
                .method("PadLeft", Some(STRING), "PadLeft(int totalWidth)")
                .method("PadRight", Some(STRING), "PadRight(int totalWidth)")
                .method("CompareTo", Some(INT32), "CompareTo(string strB)")
                .method("ToString", Some(STRING), "ToString()")
                .method("Equals", Some(BOOL), "Equals(string value)")
                .static_field("Empty", STRING)
                .static_method("Format", Some(STRING), "Format(string format, object arg0)")
                .static_method(
                    "Format",
                    Some(STRING),
                    "Format(string format, params object[] args)",
                )
                .static_method(
                    "IsNullOrEmpty",
                    Some(BOOL),
                    "IsNullOrEmpty(string value)",
                )
                .static_method(
                    "IsNullOrWhiteSpace",
                    Some(BOOL),
                    "IsNullOrWhiteSpace(string value)",
                )
                .static_method(
                    "Join",
                    Some(STRING),
                    "Join(string separator, params string[] values)",
                )
                .static_method("Concat", Some(STRING), "Concat(object arg0, object arg1)");
        })
        .ty("System", "String[]", Some(OBJECT), |t| {
            t.property("Length", INT32);
        })
        .ty("System", "Int32", Some(VALUE_TYPE), |t| {
            t.method("CompareTo", Some(INT32), "CompareTo(int value)")
                .method("CompareTo", Some(INT32), "CompareTo(object value)")
                .method("Equals", Some(BOOL), "Equals(int obj)")
                .method("ToString", Some(STRING), "ToString()")
                .method("ToString", Some(STRING), "ToString(string format)")
                .static_method("Parse", Some(INT32), "Parse(string s)")
                .static_method("TryParse", Some(BOOL), "TryParse(string s, out int result)")
                .static_field("MaxValue", INT32)
                .static_field("MinValue", INT32);
        })
        .ty("System", "Int64", Some(VALUE_TYPE), |t| {
            t.method("CompareTo", Some(INT32), "CompareTo(long value)")
                .method("Equals", Some(BOOL), "Equals(long obj)")
                .method("ToString", Some(STRING), "ToString()")
                .static_method("Parse", Some(INT64), "Parse(string s)")
                .static_field("MaxValue", INT64)
                .static_field("MinValue", INT64);
        })
        .ty("System", "Double", Some(VALUE_TYPE), |t| {
            t.method("CompareTo", Some(INT32), "CompareTo(double value)")
                .method("Equals", Some(BOOL), "Equals(double obj)")
                .method("ToString", Some(STRING), "ToString()")
                .method("ToString", Some(STRING), "ToString(string format)")
                .static_method("Parse", Some(DOUBLE), "Parse(string s)")
                .static_method("IsNaN", Some(BOOL), "IsNaN(double d)")
                .static_method("IsInfinity", Some(BOOL), "IsInfinity(double d)")
                .static_field("MaxValue", DOUBLE)
                .static_field("MinValue", DOUBLE)
                .static_field("Epsilon", DOUBLE)
                .static_field("NaN", DOUBLE);
        })
        .ty("System", "DateTime", Some(VALUE_TYPE), |t| {
            t.static_property("Now", DATE_TIME)
                .static_property("UtcNow", DATE_TIME)
                .static_property("Today", DATE_TIME)
                .static_field("MaxValue", DATE_TIME)
                .static_field("MinValue", DATE_TIME)
                .property("Year", INT32)
                .property("Month", INT32)
                .property("Day", INT32)
                .property("Hour", INT32)
                .property("Minute", INT32)
                .property("Second", INT32)
                .property("Millisecond", INT32)
                .property("DayOfWeek", DAY_OF_WEEK)
                .property("DayOfYear", INT32)
                .property("Date", DATE_TIME)
                .property("TimeOfDay", TIME_SPAN)
                .property("Ticks", INT64)
                .method("AddDays", Some(DATE_TIME), "AddDays(double value)")
                .method("AddHours", Some(DATE_TIME), "AddHours(double value)")
                .method("AddMinutes", Some(DATE_TIME), "AddMinutes(double value)")
                .method("AddSeconds", Some(DATE_TIME), "AddSeconds(double value)")
                .method("AddMonths", Some(DATE_TIME), "AddMonths(int months)")
                .method("AddYears", Some(DATE_TIME), "AddYears(int value)")
                .method("AddTicks", Some(DATE_TIME), "AddTicks(long value)")
                .method("Subtract", Some(TIME_SPAN), "Subtract(DateTime value)")
                .method("Subtract", Some(DATE_TIME), "Subtract(TimeSpan value)")
                .method("CompareTo", Some(INT32), "CompareTo(DateTime value)")
                .method("CompareTo", Some(INT32), "CompareTo(object value)")
                .method("Equals", Some(BOOL), "Equals(DateTime value)")
                .method("ToString", Some(STRING), "ToString()")
                .method("ToString", Some(STRING), "ToString(string format)")
                .method("ToShortDateString", Some(STRING), "ToShortDateString()")
                .method("ToLongDateString", Some(STRING), "ToLongDateString()")
                .method("ToShortTimeString", Some(STRING), "ToShortTimeString()")
                .static_method("Parse", Some(DATE_TIME), "Parse(string s)")
                .static_method(
                    "DaysInMonth",
                    Some(INT32),
                    "DaysInMonth(int year, int month)",
                )
                .static_method("IsLeapYear", Some(BOOL), "IsLeapYear(int year)");
        })
        .ty("System", "TimeSpan", Some(VALUE_TYPE), |t| {
            t.property("Days", INT32)
                .property("Hours", INT32)
                .property("Minutes", INT32)
                .property("Seconds", INT32)
                .property("TotalDays", DOUBLE)
                .property("TotalHours", DOUBLE)
                .property("TotalMinutes", DOUBLE)
                .property("TotalSeconds", DOUBLE)
                .property("Ticks", INT64)
                .method("Add", Some(TIME_SPAN), "Add(TimeSpan ts)")
                .method("Subtract", Some(TIME_SPAN), "Subtract(TimeSpan ts)")
                .method("Negate", Some(TIME_SPAN), "Negate()")
                .method("Duration", Some(TIME_SPAN), "Duration()")
                .method("CompareTo", Some(INT32), "CompareTo(TimeSpan value)")
                .method("ToString", Some(STRING), "ToString()")
                .static_method("FromDays", Some(TIME_SPAN), "FromDays(double value)")
                .static_method("FromHours", Some(TIME_SPAN), "FromHours(double value)")
                .static_method("FromMinutes", Some(TIME_SPAN), "FromMinutes(double value)")
                .static_method("FromSeconds", Some(TIME_SPAN), "FromSeconds(double value)")
                .static_method("Parse", Some(TIME_SPAN), "Parse(string s)")
                .static_field("Zero", TIME_SPAN);
        })
        .ty("System", "DayOfWeek", Some(VALUE_TYPE), |t| {
            t.method("ToString", Some(STRING), "ToString()")
                .method("CompareTo", Some(INT32), "CompareTo(object target)");
        })
        .ty("System", "Math", Some(OBJECT), |t| {
            t.static_method("Abs", Some(INT32), "Abs(int value)")
                .static_method("Abs", Some(DOUBLE), "Abs(double value)")
                .static_method("Max", Some(INT32), "Max(int val1, int val2)")
                .static_method("Max", Some(DOUBLE), "Max(double val1, double val2)")
                .static_method("Min", Some(INT32), "Min(int val1, int val2)")
                .static_method("Min", Some(DOUBLE), "Min(double val1, double val2)")
                .static_method("Sqrt", Some(DOUBLE), "Sqrt(double d)")
                .static_method("Pow", Some(DOUBLE), "Pow(double x, double y)")
                .static_method("Floor", Some(DOUBLE), "Floor(double d)")
                .static_method("Ceiling", Some(DOUBLE), "Ceiling(double a)")
                .static_method("Round", Some(DOUBLE), "Round(double value)")
                .static_method("Round", Some(DOUBLE), "Round(double value, int digits)")
                .static_field("PI", DOUBLE)
                .static_field("E", DOUBLE);
        })
        .build();

    Arc::new(catalog)
}
