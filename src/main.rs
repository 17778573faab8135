use PubChemFetch::Examples::pubchem_examples::pubchem_examples;
use PubChemFetch::Utils::logging::init_logger;
use log::LevelFilter;

pub fn main() {
    init_logger(LevelFilter::Info);
    //
    let task: usize = 1;
    pubchem_examples(task);
}
