mod unit_asl_parser;
