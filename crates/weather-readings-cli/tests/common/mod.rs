use std::path::{Path, PathBuf};

type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Region-grouped source order: the countries are not in natural order.
pub const READINGS_CSV: &str = "\
Region,Country,State,City,Month,Day,Year,AvgTemperature
Africa,Algeria,,Algiers,1,1,1995,64.2
Africa,Algeria,,Algiers,1,2,1995,49.4
Africa,Algeria,,Algiers,1,1,1996,48.8
Europe,Germany,,Berlin,1,1,1995,30.1
North America,US,Arizona,Phoenix,1,1,2000,60.0
North America,US,Arizona,Phoenix,1,1,2001,62.0
North America,US,Arizona,Phoenix,1,1,2002,-99
North America,US,Arizona,Phoenix,1,1,2003,66.0
North America,Canada,Ontario,Toronto,1,1,2000,20.5
";

pub fn write_readings_csv(dir: &Path) -> TestResult<PathBuf> {
    let path = dir.join("city_temperature.csv");
    std::fs::write(&path, READINGS_CSV)?;
    Ok(path)
}
